//! Map-file loader (a collaborator, spec §6): parses the MovingAI-style
//! format into a [`Grid`]. Not part of the core contract — the core only
//! ever sees the resulting `Grid`.

use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};

use crate::grid::Grid;

/// Parses `height <H>` / `width <W>` header lines (order-tolerant), a
/// `map` sentinel, then `H` rows of `W` characters. `.` is free; any other
/// character is blocked, matching the original loader's "anything that
/// isn't a floor tile is an obstacle" rule.
pub fn load_grid(path: impl AsRef<Path>) -> Result<Grid> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading map file {}", path.display()))?;
    parse_grid(&text)
}

pub fn parse_grid(text: &str) -> Result<Grid> {
    let mut lines = text.lines();
    let mut height = None;
    let mut width = None;

    for line in lines.by_ref() {
        let trimmed = line.trim();
        if trimmed.eq_ignore_ascii_case("map") {
            break;
        }
        let mut tokens = trimmed.split_whitespace();
        match tokens.next() {
            Some(key) if key.eq_ignore_ascii_case("height") => {
                height = Some(
                    tokens
                        .next()
                        .ok_or_else(|| anyhow!("missing value after 'height'"))?
                        .parse::<usize>()
                        .context("parsing height")?,
                );
            }
            Some(key) if key.eq_ignore_ascii_case("width") => {
                width = Some(
                    tokens
                        .next()
                        .ok_or_else(|| anyhow!("missing value after 'width'"))?
                        .parse::<usize>()
                        .context("parsing width")?,
                );
            }
            _ => {}
        }
    }

    let height = height.ok_or_else(|| anyhow!("map file is missing a 'height' header line"))?;
    let width = width.ok_or_else(|| anyhow!("map file is missing a 'width' header line"))?;

    let mut free = Vec::with_capacity(height);
    for (row_idx, line) in lines.by_ref().take(height).enumerate() {
        if line.chars().count() < width {
            return Err(anyhow!(
                "row {row_idx} has {} characters, expected at least {width}",
                line.chars().count()
            ));
        }
        free.push(line.chars().take(width).map(|ch| ch == '.').collect());
    }

    if free.len() != height {
        return Err(anyhow!(
            "map file declares height {height} but only has {} map rows",
            free.len()
        ));
    }

    Ok(Grid::new(free))
}
