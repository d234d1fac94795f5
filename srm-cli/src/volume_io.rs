//! Reader/writer for the CLI's raw little-endian volume format.
//!
//! Layout: a 13-byte header (`depth: u32`, `height: u32`, `width: u32`,
//! `bit_depth: u8` where `bit_depth` is 8, 16, or 32), followed by
//! `depth * height * width` samples of that width, little-endian, in the
//! canonical `z*H*W + y*W + x` order (no interior padding). There is no
//! teacher counterpart for this format; it exists only to give
//! `segment-volume` something to read and write, so it is kept deliberately
//! minimal.

use anyhow::{bail, Context, Result};
use srm_core::{Raster, Shape};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// A volume decoded from disk, tagged by its sample width.
pub enum DecodedVolume {
    U8(Raster<u8>),
    U16(Raster<u16>),
    U32(Raster<u32>),
}

pub fn read_volume(path: &Path) -> Result<Raster<u8>> {
    match read_volume_tagged(path)? {
        DecodedVolume::U8(raster) => Ok(raster),
        DecodedVolume::U16(_) | DecodedVolume::U32(_) => {
            bail!("segment-volume currently only supports 8-bit volumes")
        }
    }
}

pub fn read_volume_tagged(path: &Path) -> Result<DecodedVolume> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let mut reader = BufReader::new(file);

    let mut header = [0u8; 13];
    reader
        .read_exact(&mut header)
        .context("volume file is shorter than the 13-byte header")?;

    let depth = u32::from_le_bytes(header[0..4].try_into().unwrap()) as usize;
    let height = u32::from_le_bytes(header[4..8].try_into().unwrap()) as usize;
    let width = u32::from_le_bytes(header[8..12].try_into().unwrap()) as usize;
    let bit_depth = header[12];

    let shape = Shape::Three { width, height, depth };
    let element_count = shape.element_count();

    match bit_depth {
        8 => {
            let mut data = vec![0u8; element_count];
            reader.read_exact(&mut data).context("volume data shorter than header declares")?;
            Ok(DecodedVolume::U8(Raster::new(shape, data)?))
        }
        16 => {
            let mut raw = vec![0u8; element_count * 2];
            reader.read_exact(&mut raw).context("volume data shorter than header declares")?;
            let data = raw.chunks_exact(2).map(|c| u16::from_le_bytes([c[0], c[1]])).collect();
            Ok(DecodedVolume::U16(Raster::new(shape, data)?))
        }
        32 => {
            let mut raw = vec![0u8; element_count * 4];
            reader.read_exact(&mut raw).context("volume data shorter than header declares")?;
            let data = raw
                .chunks_exact(4)
                .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
                .collect();
            Ok(DecodedVolume::U32(Raster::new(shape, data)?))
        }
        other => bail!("unsupported bit depth in volume header: {other}"),
    }
}

pub fn write_volume(path: &Path, raster: &Raster<u8>) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    write_header(&mut writer, raster.shape(), 8)?;
    writer.write_all(raster.data()).context("writing volume samples")?;
    Ok(())
}

fn write_header(writer: &mut impl Write, shape: Shape, bit_depth: u8) -> Result<()> {
    let depth = shape.depth().unwrap_or(1) as u32;
    let height = shape.height() as u32;
    let width = shape.width() as u32;
    writer.write_all(&depth.to_le_bytes())?;
    writer.write_all(&height.to_le_bytes())?;
    writer.write_all(&width.to_le_bytes())?;
    writer.write_all(&[bit_depth])?;
    Ok(())
}
