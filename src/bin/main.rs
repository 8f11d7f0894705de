//! Host preview of the reader screens: loads a corpus and a font set, lays
//! out the reading and context pages, optionally resolves a tap into a lookup
//! report, and saves both screens as PPM images.

#[macro_use]
extern crate clap;

use std::{error::Error, path::PathBuf};

use clap::{App, Arg, ArgMatches};
use dualscreen_fb::{DualRaster, HEIGHT, Screen};
use lexis_core::{
    LookupConfig, LookupMode, LookupReport, PageConfig, PageHeader, Palette,
    font::{FAMILY_NAMES, ZOOM_SIZES},
    page::{self, context_window},
    text_policy::valid_prefix,
};
use log::{info, warn};

use loading::{Assets, load_assets};

#[path = "main/loading.rs"]
mod loading;
#[path = "main/snapshot.rs"]
mod snapshot;

const LOOKUP_FOOTER: &str = "[B] back  Up/Dn scroll";
const WORD_BYTES: usize = 64;

struct Options {
    font_dir: PathBuf,
    corpus: PathBuf,
    out_dir: PathBuf,
    family: usize,
    zoom: usize,
    palette: Palette,
    book: u16,
    line: u16,
    tap: Option<(i32, i32)>,
    mode: LookupMode,
    scroll: usize,
    page: PageConfig,
}

fn parse_number<T: std::str::FromStr>(matches: &ArgMatches<'_>, name: &str) -> Result<T, String> {
    let value = matches.value_of(name).unwrap_or_default();
    value
        .parse()
        .map_err(|_| format!("--{}: not a number: {}", name, value))
}

fn parse_tap(value: &str) -> Result<(i32, i32), String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("--tap expects X,Y, got {}", value))?;
    let x = x.trim().parse().map_err(|_| format!("--tap: bad x: {}", x))?;
    let y = y.trim().parse().map_err(|_| format!("--tap: bad y: {}", y))?;
    Ok((x, y))
}

fn parse_mode(value: &str) -> Result<LookupMode, String> {
    match value {
        "morph" => Ok(LookupMode::Morphology),
        "dict" => Ok(LookupMode::Dictionary),
        other => Err(format!("--mode: expected morph or dict, got {}", other)),
    }
}

fn options() -> Result<Options, String> {
    let matches = App::new("lexis")
        .version(crate_version!())
        .about("Render corpus reader screens to PPM images")
        .arg(
            Arg::with_name("corpus")
                .value_name("CORPUS")
                .required(true)
                .help("PRDB corpus file"),
        )
        .arg(
            Arg::with_name("fonts")
                .long("fonts")
                .takes_value(true)
                .default_value(".")
                .help("Directory holding font_<family>_<size>.bin files"),
        )
        .arg(
            Arg::with_name("out")
                .short("o")
                .long("out")
                .takes_value(true)
                .default_value(".")
                .help("Directory for top.ppm and bottom.ppm"),
        )
        .arg(
            Arg::with_name("family")
                .long("family")
                .takes_value(true)
                .default_value("0")
                .help("Font family index: 0 Gentium, 1 DejaVu, 2 Cardo"),
        )
        .arg(
            Arg::with_name("zoom")
                .long("zoom")
                .takes_value(true)
                .default_value("1")
                .help("Zoom level index into 8,10,12,14,16 px"),
        )
        .arg(
            Arg::with_name("palette")
                .long("palette")
                .takes_value(true)
                .default_value("dark")
                .help("Color preset: dark, light or sepia"),
        )
        .arg(
            Arg::with_name("book")
                .short("b")
                .long("book")
                .takes_value(true)
                .default_value("1"),
        )
        .arg(
            Arg::with_name("line")
                .short("l")
                .long("line")
                .takes_value(true)
                .default_value("1"),
        )
        .arg(
            Arg::with_name("tap")
                .long("tap")
                .takes_value(true)
                .value_name("X,Y")
                .help("Tap the reading screen and render the lookup report"),
        )
        .arg(
            Arg::with_name("mode")
                .long("mode")
                .takes_value(true)
                .possible_values(&["morph", "dict"])
                .default_value("morph"),
        )
        .arg(
            Arg::with_name("scroll")
                .long("scroll")
                .takes_value(true)
                .default_value("0")
                .help("First lookup report line to show"),
        )
        .arg(
            Arg::with_name("header")
                .long("header")
                .help("Draw the position header above the reading page"),
        )
        .get_matches();

    let palette_name = matches.value_of("palette").unwrap_or_default();
    let palette = Palette::named(palette_name)
        .ok_or_else(|| format!("--palette: unknown preset {}", palette_name))?;

    Ok(Options {
        font_dir: PathBuf::from(matches.value_of("fonts").unwrap_or(".")),
        corpus: PathBuf::from(matches.value_of("corpus").unwrap_or_default()),
        out_dir: PathBuf::from(matches.value_of("out").unwrap_or(".")),
        family: parse_number(&matches, "family")?,
        zoom: parse_number(&matches, "zoom")?,
        palette,
        book: parse_number(&matches, "book")?,
        line: parse_number(&matches, "line")?,
        tap: matches.value_of("tap").map(parse_tap).transpose()?,
        mode: parse_mode(matches.value_of("mode").unwrap_or("morph"))?,
        scroll: parse_number(&matches, "scroll")?,
        page: PageConfig {
            show_header: matches.is_present("header"),
            ..PageConfig::default()
        },
    })
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = options()?;
    if options.family >= FAMILY_NAMES.len() || options.zoom >= ZOOM_SIZES.len() {
        warn!(
            "family {} / zoom {} out of range; clamping",
            options.family, options.zoom
        );
    }

    let Assets { fonts, corpus } = load_assets(
        &options.font_dir,
        &options.corpus,
        options.family,
        options.zoom,
    )?;
    let font = fonts.active().ok_or("no active font")?;

    let book_count = corpus.book_count();
    if options.book == 0 || u32::from(options.book) > book_count {
        return Err(format!("book {} not in 1..={}", options.book, book_count).into());
    }
    let max_line = corpus.max_line(options.book);
    let last_line = max_line.clamp(1, u16::MAX as u32) as u16;
    let line = options.line.clamp(1, last_line);

    let per_screen = options.page.lines_per_screen(font, HEIGHT);
    let fetch = options.page.fetch_count(per_screen);

    let mut raster = Box::new(DualRaster::new());

    // Reading page on the bottom screen.
    raster.select(Screen::Bottom);
    let header = options.page.show_header.then(|| {
        PageHeader {
            book: options.book,
            book_count,
            first_line: line,
            last_line: line
                .saturating_add(per_screen as u16)
                .saturating_sub(1)
                .min(last_line),
            max_line,
            font_px: fonts.zoom_size(),
            fullscreen: false,
        }
        .label()
    });
    let reading = page::draw_page(
        raster.target_mut(),
        font,
        &options.palette,
        &options.page,
        header.as_deref(),
        corpus.lines(options.book, line).take(fetch),
    );
    info!(
        "book {} line {}: {} lines on the reading page",
        options.book,
        line,
        reading.len()
    );

    // Lines leading up to the page on the top screen.
    raster.select(Screen::Top);
    let (start, count) = context_window(per_screen, line);
    page::draw_context(
        raster.target_mut(),
        font,
        &options.palette,
        &options.page,
        corpus.lines(options.book, start).take(count),
    );
    raster.flip();
    let frame = raster.flip_count();
    raster.draw_heartbeat(frame);

    if let Some((tx, ty)) = options.tap {
        let mut word_buf = [0u8; WORD_BYTES];
        match reading.touch_to_word(tx, ty, &mut word_buf) {
            Some(bytes) => {
                let word = valid_prefix(bytes);
                info!("tap ({}, {}) hit {:?}", tx, ty, word);

                let mut report =
                    LookupReport::build(&corpus, word, options.mode, &LookupConfig::default());
                for _ in 0..options.scroll {
                    report.scroll_down();
                }
                let drawn = report.draw(
                    raster.target_mut(),
                    font,
                    &options.palette,
                    Some(LOOKUP_FOOTER),
                );
                info!(
                    "lookup report: {} lines, {} shown from {}",
                    report.lines().len(),
                    drawn,
                    report.scroll()
                );
                raster.flip();
                let frame = raster.flip_count();
                raster.draw_heartbeat(frame);
            }
            None => info!("tap ({}, {}) hit no word", tx, ty),
        }
    }

    let top = options.out_dir.join("top.ppm");
    let bottom = options.out_dir.join("bottom.ppm");
    snapshot::save_ppm(&top, raster.front(Screen::Top))?;
    snapshot::save_ppm(&bottom, raster.front(Screen::Bottom))?;
    info!("wrote {} and {}", top.display(), bottom.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tap_coordinates_parse() {
        assert_eq!(parse_tap("12,40"), Ok((12, 40)));
        assert_eq!(parse_tap(" 3 , 7 "), Ok((3, 7)));
        assert!(parse_tap("12").is_err());
        assert!(parse_tap("a,1").is_err());
    }

    #[test]
    fn word_cut_by_tap_buffer_keeps_whole_characters() {
        // One ASCII byte then two-byte letters: the last buffer byte starts a letter.
        let word = format!("a{}", "ω".repeat(40));
        let mut buf = [0u8; WORD_BYTES];
        buf.copy_from_slice(&word.as_bytes()[..WORD_BYTES]);

        let cut = valid_prefix(&buf);
        assert_eq!(cut.len(), WORD_BYTES - 1);
        assert!(!cut.contains('\u{FFFD}'));
        assert!(word.starts_with(cut));
    }

    #[test]
    fn lookup_modes_parse() {
        assert_eq!(parse_mode("morph"), Ok(LookupMode::Morphology));
        assert_eq!(parse_mode("dict"), Ok(LookupMode::Dictionary));
        assert!(parse_mode("notes").is_err());
    }
}
