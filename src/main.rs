// src/main.rs

use std::fs::File;
use std::io::{self, BufWriter, Read};

use anyhow::Context;
use log::{info, warn};

use hexglyph::{
    config::Config, renderer::KeyEcho, Framebuffer, GlyphTable, Rgba, TextRenderer, Utf8Decoder,
};

/// UTF-8 box drawing sample (after Markus Kuhn's UTF-8 demo).
const DEMO_TEXT: [&str; 8] = [
    " ╔══╦══╗  ┌──┬──┐  ╭──┬──╮  ╭──┬──╮  ┏━━┳━━┓  ┎┒┏┑   ╷  ╻ ┏┯┓ ┌┰┐    ▊ ╱╲╱╲╳╳╳",
    " ║┌─╨─┐║  │╔═╧═╗│  │╒═╪═╕│  │╓─╁─╖│  ┃┌─╂─┐┃  ┗╃╄┙  ╶┼╴╺╋╸┠┼┨ ┝╋┥    ▋ ╲╱╲╱╳╳╳",
    " ║│╲ ╱│║  │║   ║│  ││ │ ││  │║ ┃ ║│  ┃│ ╿ │┃  ┍╅╆┓   ╵  ╹ ┗┷┛ └┸┘    ▌ ╱╲╱╲╳╳╳",
    " ╠╡ ╳ ╞╣  ├╢   ╟┤  ├┼─┼─┼┤  ├╫─╂─╫┤  ┣┿╾┼╼┿┫  ┕┛┖┚     ┌┄┄┐ ╎ ┏┅┅┓ ┋ ▍ ╲╱╲╱╳╳╳",
    " ║│╱ ╲│║  │║   ║│  ││ │ ││  │║ ┃ ║│  ┃│ ╽ │┃  ░░▒▒▓▓██ ┊  ┆ ╎ ╏  ┇ ┋ ▎        ",
    " ║└─╥─┘║  │╚═╤═╝│  │╘═╪═╛│  │╙─╀─╜│  ┃└─╂─┘┃  ░░▒▒▓▓██ ┊  ┆ ╎ ╏  ┇ ┋ ▏        ",
    " ╚══╩══╝  └──┴──┘  ╰──┴──╯  ╰──┴──╯  ┗━━┻━━┛           └╌╌┘ ╎ ┗╍╍┛ ┋  ▁▂▃▄▅▆▇█",
    " Type characters on stdin to display the corresponding Unicode glyphs        ",
];

fn main() -> anyhow::Result<()> {
    // Initialize the logger. Default filter is "info" if RUST_LOG is not set.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    info!("Starting hexglyph...");

    let config = Config::from_env().context("Failed to load configuration")?;

    // --- Font ---
    let (table, report) = GlyphTable::open(&config.font.path)
        .with_context(|| format!("Failed to load font {}", config.font.path.display()))?;
    if !report.rejected.is_empty() {
        warn!(
            "{} malformed font line(s) skipped, first at line {}",
            report.rejected.len(),
            report.rejected[0].line
        );
    }

    // --- Surface ---
    let background = Rgba::from(config.surface.background);
    let foreground = Rgba::from(config.text.foreground);
    let mut framebuffer = Framebuffer::new(config.surface.width, config.surface.height)
        .context("Failed to allocate surface")?;
    framebuffer.clear(background);
    info!(
        "Surface {}x{} initialized.",
        framebuffer.width(),
        framebuffer.height()
    );

    let renderer = TextRenderer::new(&table).with_advance(config.text.advance);
    let stats = renderer.render_lines(
        DEMO_TEXT,
        config.text.origin_x,
        config.text.origin_y,
        config.text.line_height,
        foreground,
        &mut framebuffer,
    );
    info!(
        "Demo text rendered: {} symbols, {} invalid, {} without glyph.",
        stats.symbols, stats.invalid, stats.missing
    );

    // --- Key echo ---
    if config.echo.enabled {
        let mut input = Vec::new();
        io::stdin()
            .read_to_end(&mut input)
            .context("Failed to read standard input")?;
        let mut echo = KeyEcho::new(config.echo.start_x, config.echo.row_y);
        for symbol in Utf8Decoder::new(&input).filter(|s| s.codepoint > 0x1F) {
            echo.echo(&renderer, symbol.codepoint, foreground, &mut framebuffer);
        }
    }

    // --- Output ---
    if let Some(path) = &config.output.ppm_path {
        let file = File::create(path)
            .with_context(|| format!("Failed to create output image {}", path.display()))?;
        framebuffer
            .write_ppm(BufWriter::new(file))
            .with_context(|| format!("Failed to write output image {}", path.display()))?;
        info!("Wrote {}", path.display());
    }
    if config.output.text_preview {
        let first_row = config.text.origin_y.max(0) as usize;
        let last_row = first_row + config.text.line_height.max(0) as usize * DEMO_TEXT.len();
        print!("{}", framebuffer.to_text(background, first_row..last_row));
    }

    info!("hexglyph exited successfully.");
    Ok(())
}
