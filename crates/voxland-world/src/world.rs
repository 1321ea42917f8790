use crate::height::HeightField;
use crate::vegetation::VegetationPlacer;
use crate::worldgen::WorldGenParams;

/// Immutable worldgen state shared by chunk generation and queries.
#[derive(Clone, Debug)]
pub struct World {
    pub seed: i32,
    pub load_radius: i32,
    pub params: WorldGenParams,
    field: HeightField,
    vegetation: VegetationPlacer,
}

impl World {
    pub fn new(params: WorldGenParams) -> Self {
        log::info!(
            target: "worldgen",
            "world seed={} load_radius={} tree_stride={} tree_density={:.2}",
            params.seed,
            params.load_radius,
            params.tree_stride,
            params.tree_density
        );
        Self {
            seed: params.seed,
            load_radius: params.load_radius,
            field: HeightField::new(&params),
            vegetation: VegetationPlacer::new(&params),
            params,
        }
    }

    #[inline]
    pub fn field(&self) -> &HeightField {
        &self.field
    }

    #[inline]
    pub fn vegetation(&self) -> &VegetationPlacer {
        &self.vegetation
    }

    #[inline]
    pub fn height(&self, x: i32, z: i32) -> i32 {
        self.field.height(x, z)
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(WorldGenParams::default())
    }
}
