use anyhow::{Context, Result};
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Cell, Table};
use serde::Serialize;
use std::io::Write;

/// Output format for image listings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One image reference per line
    #[default]
    List,
    Json,
    Table,
}

#[derive(Serialize)]
struct ImagesOutput<'a> {
    images: &'a [String],
}

/// Print cleaned image references in release order
pub fn channel_images<W: Write>(w: &mut W, images: &[String], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::List => {
            for image in images {
                writeln!(w, "{}", image)?;
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&ImagesOutput { images })
                .context("Failed to serialize images")?;
            writeln!(w, "{}", json)?;
        }
        OutputFormat::Table => {
            if images.is_empty() {
                writeln!(w, "No images found")?;
                return Ok(());
            }

            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .apply_modifier(UTF8_ROUND_CORNERS)
                .set_header(vec![Cell::new("IMAGE")]);

            for image in images {
                table.add_row(vec![Cell::new(image)]);
            }

            writeln!(w, "{}", table)?;
        }
    }

    w.flush()?;
    Ok(())
}
