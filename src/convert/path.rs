//! Path data (`d` attribute) tokenizer
//!
//! Only absolute `M`, `L`, `A` and `Z` (either case for close) become
//! commands. Other letters are tokenized so their numbers are consumed, then
//! dropped.

use std::sync::LazyLock;

use glam::{DVec2, dvec2};
use regex_lite::Regex;

use crate::transform::NUMBER;
use crate::types::Angle;

static COMMAND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"([MmLlHhVvCcSsQqTtAaZz])((?:\s*[-+]?[0-9]*\.?[0-9]+(?:[eE][-+]?[0-9]+)?\s*,?\s*)*)",
    )
    .unwrap()
});

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(DVec2),
    LineTo(DVec2),
    ArcTo {
        radii: DVec2,
        x_axis_rotation: Angle,
        large_arc: bool,
        sweep: bool,
        to: DVec2,
    },
    ClosePath,
}

/// Result of tokenizing one `d` attribute
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathData {
    pub commands: Vec<PathCommand>,
    /// Command letters that produced nothing, in order of appearance
    pub skipped: Vec<char>,
}

fn numbers(params: &str) -> Vec<f64> {
    NUMBER
        .find_iter(params)
        .filter_map(|m| m.as_str().parse().ok())
        .collect()
}

/// Tokenize path data into absolute commands.
///
/// Extra pairs after `M` are implicit `LineTo`s. Incomplete trailing groups
/// are dropped.
pub fn parse_path_data(d: &str) -> PathData {
    let mut data = PathData::default();

    for caps in COMMAND.captures_iter(d) {
        let Some(letter) = caps.get(1).and_then(|m| m.as_str().chars().next()) else {
            continue;
        };
        let args = caps.get(2).map(|m| numbers(m.as_str())).unwrap_or_default();

        match letter {
            'M' => {
                for (i, pair) in args.chunks_exact(2).enumerate() {
                    let p = dvec2(pair[0], pair[1]);
                    data.commands.push(if i == 0 {
                        PathCommand::MoveTo(p)
                    } else {
                        PathCommand::LineTo(p)
                    });
                }
            }
            'L' => {
                data.commands.extend(
                    args.chunks_exact(2)
                        .map(|pair| PathCommand::LineTo(dvec2(pair[0], pair[1]))),
                );
            }
            'A' => {
                data.commands
                    .extend(args.chunks_exact(7).map(|g| PathCommand::ArcTo {
                        radii: dvec2(g[0], g[1]),
                        x_axis_rotation: Angle::degrees(g[2]),
                        large_arc: g[3] != 0.0,
                        sweep: g[4] != 0.0,
                        to: dvec2(g[5], g[6]),
                    }));
            }
            'Z' | 'z' => data.commands.push(PathCommand::ClosePath),
            other => data.skipped.push(other),
        }
    }

    data
}
