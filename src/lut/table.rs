use std::{io::Cursor, path::Path};

use anyhow::Context;

use crate::{
    foundation::core::Rgb,
    foundation::error::{LumaError, LumaResult},
    foundation::math::quantize_u8,
    grade::evaluator::GradeEvaluator,
    grade::preset::GradePreset,
};

/// Samples per axis of the 3D grid.
pub const LUT_SIZE: u32 = 16;
/// Strip width in pixels (`LUT_SIZE * LUT_SIZE`).
pub const LUT_WIDTH: u32 = LUT_SIZE * LUT_SIZE;
/// Strip height in pixels (`LUT_SIZE`).
pub const LUT_HEIGHT: u32 = LUT_SIZE;

const BYTES_PER_PIXEL: usize = 4;
const STRIDE: usize = LUT_WIDTH as usize * BYTES_PER_PIXEL;
const LEN_BYTES: usize = STRIDE * LUT_HEIGHT as usize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// How consumers should interpret the stored bytes. Does not change the stored values.
pub enum LutEncoding {
    /// Gamma (sRGB) tagged storage.
    Srgb,
    /// Linear tagged storage.
    Linear,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
/// Strip layout variant: row orientation and storage encoding.
pub struct LutLayout {
    /// When set, row 0 holds green = 1 (black in the bottom-left corner).
    pub flip_vertical: bool,
    /// Storage tag.
    pub encoding: LutEncoding,
}

impl LutLayout {
    /// Layout consumed by the passthrough compositor.
    pub const PASSTHROUGH: Self = Self {
        flip_vertical: true,
        encoding: LutEncoding::Srgb,
    };

    /// Layout consumed by the post-process volume.
    pub const VOLUME: Self = Self {
        flip_vertical: false,
        encoding: LutEncoding::Linear,
    };

    /// Row holding green grid index `g` in this layout.
    pub fn row_for_green(self, g: u32) -> u32 {
        if self.flip_vertical {
            LUT_SIZE - 1 - g
        } else {
            g
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
/// A 16x16x16 color cube stored as a 256x16 RGBA8 strip.
///
/// Pixel `(r + b * 16, y)` holds the grade of grid color `(r, g, b) / 15`, where `y` is `g`
/// or `15 - g` depending on [`LutLayout::flip_vertical`].
pub struct LutTable {
    layout: LutLayout,
    data: Vec<u8>,
}

impl std::fmt::Debug for LutTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LutTable")
            .field("layout", &self.layout)
            .field("len_bytes", &self.data.len())
            .finish()
    }
}

impl LutTable {
    /// Bake `preset` into a strip.
    #[tracing::instrument(skip(preset))]
    pub fn generate(preset: &GradePreset, layout: LutLayout) -> Self {
        Self::generate_with(&GradeEvaluator::new(preset), layout)
    }

    /// Bake an already constructed evaluator into a strip.
    pub fn generate_with(evaluator: &GradeEvaluator, layout: LutLayout) -> Self {
        let mut data = vec![0u8; LEN_BYTES];
        let scale = 1.0 / (LUT_SIZE - 1) as f32;

        for g in 0..LUT_SIZE {
            let y = layout.row_for_green(g) as usize;
            let row = &mut data[y * STRIDE..(y + 1) * STRIDE];
            for b in 0..LUT_SIZE {
                for r in 0..LUT_SIZE {
                    let c = Rgb::new(r as f32 * scale, g as f32 * scale, b as f32 * scale);
                    let out = evaluator.apply(c);
                    let x = (r + b * LUT_SIZE) as usize;
                    row[x * BYTES_PER_PIXEL..(x + 1) * BYTES_PER_PIXEL].copy_from_slice(&[
                        quantize_u8(out.r),
                        quantize_u8(out.g),
                        quantize_u8(out.b),
                        255,
                    ]);
                }
            }
        }

        Self { layout, data }
    }

    /// Strip whose every cell maps a grid color to itself.
    pub fn identity(layout: LutLayout) -> Self {
        Self::generate(&GradePreset::neutral(), layout)
    }

    /// Wrap existing RGBA8 strip bytes, checking the 256x16 contract.
    pub fn from_rgba8(
        width: u32,
        height: u32,
        data: Vec<u8>,
        layout: LutLayout,
    ) -> LumaResult<Self> {
        if width != LUT_WIDTH || height != LUT_HEIGHT {
            return Err(LumaError::validation(format!(
                "lut strip must be {LUT_WIDTH}x{LUT_HEIGHT}, got {width}x{height}"
            )));
        }
        if data.len() != LEN_BYTES {
            return Err(LumaError::validation(format!(
                "lut strip must hold {LEN_BYTES} bytes, got {}",
                data.len()
            )));
        }
        Ok(Self { layout, data })
    }

    /// Layout of the stored rows.
    pub fn layout(&self) -> LutLayout {
        self.layout
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        LUT_WIDTH
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        LUT_HEIGHT
    }

    /// Row-major RGBA8 bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// One strip row of RGBA8 bytes.
    pub fn row(&self, y: u32) -> &[u8] {
        let y = y as usize;
        &self.data[y * STRIDE..(y + 1) * STRIDE]
    }

    /// Pixel at strip coordinates.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = y as usize * STRIDE + x as usize * BYTES_PER_PIXEL;
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    /// Pixel for grid indices `(r, g, b)`, each in `0..16`, independent of layout.
    pub fn cell(&self, r: u32, g: u32, b: u32) -> [u8; 4] {
        self.pixel(r + b * LUT_SIZE, self.layout.row_for_green(g))
    }

    /// Copy with rows reversed and the flip flag toggled. Cell content is unchanged.
    pub fn flipped(&self) -> Self {
        let mut data = Vec::with_capacity(LEN_BYTES);
        for y in (0..LUT_HEIGHT).rev() {
            data.extend_from_slice(self.row(y));
        }
        Self {
            layout: LutLayout {
                flip_vertical: !self.layout.flip_vertical,
                encoding: self.layout.encoding,
            },
            data,
        }
    }

    /// Same bytes with a different storage tag.
    pub fn with_encoding(mut self, encoding: LutEncoding) -> Self {
        self.layout.encoding = encoding;
        self
    }

    /// Convert to `layout`, flipping rows when orientations differ.
    pub fn to_layout(&self, layout: LutLayout) -> Self {
        let oriented = if self.layout.flip_vertical == layout.flip_vertical {
            self.clone()
        } else {
            self.flipped()
        };
        oriented.with_encoding(layout.encoding)
    }

    /// Encode as an RGBA8 PNG image.
    pub fn encode_png(&self) -> LumaResult<Vec<u8>> {
        let img = image::RgbaImage::from_raw(LUT_WIDTH, LUT_HEIGHT, self.data.clone())
            .ok_or_else(|| LumaError::lut("strip buffer does not match its dimensions"))?;
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png)
            .context("encode lut png")?;
        Ok(out.into_inner())
    }

    /// Write the strip as a PNG file, creating parent directories.
    pub fn save_png(&self, path: &Path) -> LumaResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        image::save_buffer_with_format(
            path,
            &self.data,
            LUT_WIDTH,
            LUT_HEIGHT,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }

    /// Load a strip image. The caller states which layout the file was authored in.
    pub fn load_png(path: &Path, layout: LutLayout) -> LumaResult<Self> {
        let img = image::open(path)
            .with_context(|| format!("open lut '{}'", path.display()))?
            .to_rgba8();
        let (w, h) = img.dimensions();
        Self::from_rgba8(w, h, img.into_raw(), layout)
    }

    /// Decode a strip from in-memory PNG bytes.
    pub fn decode_png(bytes: &[u8], layout: LutLayout) -> LumaResult<Self> {
        let img = image::load_from_memory(bytes)
            .context("decode lut png")?
            .to_rgba8();
        let (w, h) = img.dimensions();
        Self::from_rgba8(w, h, img.into_raw(), layout)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/lut/table.rs"]
mod tests;
