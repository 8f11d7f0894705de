use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use dualscreen_fb::{FrameBuffer, HEIGHT, Rgb15, WIDTH};

/// Binary PPM (`P6`) of a 15-bit surface, expanded to 8 bits per channel.
pub(super) fn write_ppm<W: Write>(out: &mut W, frame: &FrameBuffer) -> io::Result<()> {
    write!(out, "P6\n{} {}\n255\n", WIDTH, HEIGHT)?;
    for &raw in frame.pixels().iter() {
        out.write_all(&Rgb15::from_raw(raw).to_rgb888())?;
    }
    Ok(())
}

pub(super) fn save_ppm(path: &Path, frame: &FrameBuffer) -> io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    write_ppm(&mut out, frame)?;
    out.flush()
}
