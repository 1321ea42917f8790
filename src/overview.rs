//! ASCII top-down view of a height sample, used by the headless CLI.

use voxland_chunk::HeightSample;
use voxland_world::TreeBlocks;

const RAMP: &[u8] = b" .:-=+*#%";

/// Renders one character per column, rows by increasing z.
///
/// Taller columns use denser ramp characters. Trunks show as `T`, columns under
/// a leaf crown as `o`, and the player column as `@`.
pub fn render(sample: &HeightSample, trees: &[TreeBlocks], player: (i32, i32)) -> String {
    let lo = sample.min_height();
    let span = (sample.max_height() - lo).max(1);
    let mut out = String::with_capacity(sample.side * (sample.side + 1));
    for row in 0..sample.side {
        let z = sample.min_z.saturating_add(row as i32);
        for col in 0..sample.side {
            let x = sample.min_x.saturating_add(col as i32);
            let ch = if (x, z) == player {
                '@'
            } else if trees
                .iter()
                .any(|t| t.trunk.iter().any(|b| b[0] == x && b[2] == z))
            {
                'T'
            } else if trees
                .iter()
                .any(|t| t.leaves.iter().any(|b| b[0] == x && b[2] == z))
            {
                'o'
            } else {
                let h = sample.get(col, row) - lo;
                let idx = (h as usize * (RAMP.len() - 1)) / span as usize;
                RAMP[idx.min(RAMP.len() - 1)] as char
            };
            out.push(ch);
        }
        out.push('\n');
    }
    out
}
