use super::tree::{DetachedTree, NodeId};
use super::LINE_HEIGHT_PX;
use crate::error::RasterError;
use crate::raster::Rasterizer;
use folio_style::parsers::parse_color_value;
use folio_style::{contains_modern_color_function, NormalizedStyles};
use folio_types::{Bitmap, Color, Rect};
use image::{ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;

/// Paints backgrounds, border edges and text lines of a [`DetachedTree`]
/// as flat boxes and encodes the result as PNG.
///
/// Paint comes from the normalized records only. A record value carrying a
/// modern color function is rejected, the way a legacy canvas renderer
/// fails on syntax it cannot parse.
#[derive(Debug, Clone)]
pub struct PixmapRasterizer {
    backdrop: Color,
}

impl Default for PixmapRasterizer {
    fn default() -> Self {
        Self {
            backdrop: Color::white(),
        }
    }
}

impl Rasterizer<DetachedTree> for PixmapRasterizer {
    fn rasterize(
        &self,
        surface: &DetachedTree,
        styles: &NormalizedStyles<NodeId>,
        scale: f32,
    ) -> Result<Bitmap, RasterError> {
        for (_, record) in styles.records() {
            if let Some((property, value)) = record
                .iter()
                .find(|(_, value)| contains_modern_color_function(value))
            {
                return Err(RasterError::UnsupportedColor {
                    property: property.to_string(),
                    value: value.to_string(),
                });
            }
        }

        let (natural_width, natural_height) = surface.size();
        let width = (natural_width * scale).ceil().max(0.0) as u32;
        let height = (natural_height * scale).ceil().max(0.0) as u32;
        if width == 0 || height == 0 {
            return Err(RasterError::EmptySurface { width, height });
        }

        let mut canvas = RgbaImage::from_pixel(width, height, to_pixel(&self.backdrop));

        for (node, record) in styles.records() {
            let rect = scaled(surface.rect(*node), scale);
            let text_color = record
                .get("color")
                .and_then(|v| parse_color_value(v).ok())
                .unwrap_or_default();

            if let Some(background) = record
                .get("background-color")
                .and_then(|v| parse_color_value(v).ok())
            {
                fill(&mut canvas, rect, &background);
            }

            for edge in ["top", "right", "bottom", "left"] {
                let Some((edge_width, color)) = record
                    .get(&format!("border-{edge}"))
                    .and_then(parse_border)
                else {
                    continue;
                };
                let w = edge_width * scale;
                let edge_rect = match edge {
                    "top" => Rect::new(rect.x, rect.y, rect.width, w),
                    "bottom" => Rect::new(rect.x, rect.bottom() - w, rect.width, w),
                    "left" => Rect::new(rect.x, rect.y, w, rect.height),
                    _ => Rect::new(rect.right() - w, rect.y, w, rect.height),
                };
                fill(&mut canvas, edge_rect, color.as_ref().unwrap_or(&text_color));
            }

            if let Some(text_rect) = surface.text_rect(*node) {
                let text_rect = scaled(text_rect, scale);
                let line = LINE_HEIGHT_PX * scale;
                for i in 0..surface.text_lines(*node) {
                    let y = text_rect.y + i as f32 * line + line * 0.25;
                    fill(
                        &mut canvas,
                        Rect::new(text_rect.x, y, text_rect.width, line * 0.5),
                        &text_color,
                    );
                }
            }
        }

        let mut data = Vec::new();
        canvas.write_to(&mut Cursor::new(&mut data), ImageFormat::Png)?;
        Ok(Bitmap::new(data, width, height))
    }
}

/// `<width>px <style> [<color>]`
fn parse_border(shorthand: &str) -> Option<(f32, Option<Color>)> {
    let mut parts = shorthand.split_whitespace();
    let width = parts
        .next()?
        .trim_end_matches("px")
        .parse::<f32>()
        .ok()
        .filter(|w| *w > 0.0)?;
    let _style = parts.next()?;
    let rest = parts.collect::<Vec<_>>().join(" ");
    let color = if rest.is_empty() {
        None
    } else {
        parse_color_value(&rest).ok()
    };
    Some((width, color))
}

fn scaled(rect: Rect, scale: f32) -> Rect {
    Rect::new(
        rect.x * scale,
        rect.y * scale,
        rect.width * scale,
        rect.height * scale,
    )
}

fn to_pixel(color: &Color) -> Rgba<u8> {
    Rgba([color.r, color.g, color.b, (color.a * 255.0).round() as u8])
}

fn fill(canvas: &mut RgbaImage, rect: Rect, color: &Color) {
    if color.is_transparent() {
        return;
    }
    let x0 = rect.x.max(0.0).floor() as u32;
    let y0 = rect.y.max(0.0).floor() as u32;
    let x1 = (rect.right().ceil().max(0.0) as u32).min(canvas.width());
    let y1 = (rect.bottom().ceil().max(0.0) as u32).min(canvas.height());
    for y in y0..y1 {
        for x in x0..x1 {
            let pixel = canvas.get_pixel_mut(x, y);
            let Rgba([r, g, b, _]) = *pixel;
            let blended = color.over(&Color::rgb(r, g, b));
            *pixel = Rgba([blended.r, blended.g, blended.b, 255]);
        }
    }
}
