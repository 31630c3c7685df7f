use crate::parsers::{
    contains_legacy_color_function, contains_modern_color_function, is_fully_transparent,
    is_legacy_triplet, parse_color_value,
};
use crate::record::StyleRecord;
use crate::resolver::StyleResolver;

/// Every color-bearing property inspected on every node.
pub const COLOR_PROPERTIES: &[&str] = &[
    "color",
    "background-color",
    "border-top-color",
    "border-right-color",
    "border-bottom-color",
    "border-left-color",
    "outline-color",
    "box-shadow",
    "text-shadow",
];

const BORDER_EDGES: [&str; 4] = ["top", "right", "bottom", "left"];

/// What the normalizer does with one resolved color value.
///
/// Legacy triplets are kept verbatim. Hex and keyword colors are kept as the
/// equivalent triplet. Lists that only call `rgb()`/`rgba()` (shadows) are
/// kept verbatim. Anything else the rasterizer might not read, such as an
/// unresolved `var()` or an unknown keyword, is left untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorDisposition {
    /// Absent, `none`, fully transparent or unrecognised. No override is written.
    Untouched,
    /// Safe for a legacy rasterizer; pinned as an inline override.
    Keep(String),
    /// Carries a modern color function and is removed from the record.
    Drop,
}

impl ColorDisposition {
    pub fn classify(value: Option<&str>) -> Self {
        let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
            return ColorDisposition::Untouched;
        };
        if value.eq_ignore_ascii_case("none") || is_fully_transparent(value) {
            return ColorDisposition::Untouched;
        }
        if contains_modern_color_function(value) {
            return ColorDisposition::Drop;
        }
        if is_legacy_triplet(value) {
            return ColorDisposition::Keep(value.to_string());
        }
        match parse_color_value(value) {
            Ok(color) => ColorDisposition::Keep(color.to_string()),
            Err(_) if contains_legacy_color_function(value) => {
                ColorDisposition::Keep(value.to_string())
            }
            Err(_) => ColorDisposition::Untouched,
        }
    }
}

/// A property that could not be read and was left out. Never fatal.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizationSkip<N> {
    pub node: N,
    pub property: String,
    pub reason: String,
}

/// Rasterizer-facing styles for a whole subtree, in depth-first order.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedStyles<N> {
    records: Vec<(N, StyleRecord)>,
    skipped: Vec<NormalizationSkip<N>>,
    dropped: Vec<(N, String)>,
}

impl<N> Default for NormalizedStyles<N> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            skipped: Vec::new(),
            dropped: Vec::new(),
        }
    }
}

impl<N: Copy + PartialEq> NormalizedStyles<N> {
    pub fn records(&self) -> &[(N, StyleRecord)] {
        &self.records
    }

    pub fn get(&self, node: N) -> Option<&StyleRecord> {
        self.records
            .iter()
            .find(|(n, _)| *n == node)
            .map(|(_, record)| record)
    }

    pub fn skipped(&self) -> &[NormalizationSkip<N>] {
        &self.skipped
    }

    /// `(node, property)` pairs whose value carried a modern color function.
    pub fn dropped(&self) -> &[(N, String)] {
        &self.dropped
    }

    /// Every value across every record.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.records
            .iter()
            .flat_map(|(_, record)| record.iter().map(|(_, v)| v))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NormalizerConfig {
    /// Written in place of a dropped `color` so text stays legible on a
    /// light page. `None` drops the property like any other.
    pub fallback_text_color: Option<String>,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            fallback_text_color: Some("rgb(0, 0, 0)".to_string()),
        }
    }
}

/// Rewrites resolved colors of a subtree into a form a legacy rasterizer accepts.
#[derive(Debug, Clone, Default)]
pub struct StyleNormalizer {
    config: NormalizerConfig,
}

impl StyleNormalizer {
    pub fn new(config: NormalizerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    /// Walks the subtree depth-first, root included, and returns one record per node.
    ///
    /// Kept values are also pinned on the subtree as inline overrides, so a
    /// second run over the same subtree yields identical records.
    pub fn normalize<R: StyleResolver>(&self, resolver: &mut R) -> NormalizedStyles<R::Node> {
        let mut output = NormalizedStyles::default();

        for node in resolver.descendants() {
            let mut record = StyleRecord::new();

            for &property in COLOR_PROPERTIES {
                let resolved = match resolver.resolve(node, property) {
                    Ok(value) => value,
                    Err(err) => {
                        log::debug!("Skipping '{}' on {:?}: {}", property, node, err.reason);
                        output.skipped.push(NormalizationSkip {
                            node,
                            property: property.to_string(),
                            reason: err.reason,
                        });
                        continue;
                    }
                };

                match ColorDisposition::classify(resolved.as_deref()) {
                    ColorDisposition::Untouched => {}
                    ColorDisposition::Keep(value) => {
                        resolver.set_inline(node, property, &value);
                        record.insert(property, value);
                    }
                    ColorDisposition::Drop => {
                        log::debug!("Dropping unsupported color in '{}' on {:?}", property, node);
                        output.dropped.push((node, property.to_string()));
                        if property == "color" {
                            if let Some(fallback) = self.safe_fallback() {
                                resolver.set_inline(node, property, fallback);
                                record.insert(property, fallback);
                            }
                        }
                    }
                }
            }

            rebuild_borders(resolver, node, &mut record, &mut output.skipped);
            output.records.push((node, record));
        }

        output
    }

    fn safe_fallback(&self) -> Option<&str> {
        self.config
            .fallback_text_color
            .as_deref()
            .filter(|c| !contains_modern_color_function(c))
    }
}

/// Writes explicit `border-<edge>` shorthands from width, style and the
/// already-normalized edge color.
fn rebuild_borders<R: StyleResolver>(
    resolver: &R,
    node: R::Node,
    record: &mut StyleRecord,
    skipped: &mut Vec<NormalizationSkip<R::Node>>,
) {
    for edge in BORDER_EDGES {
        let width_prop = format!("border-{edge}-width");
        let style_prop = format!("border-{edge}-style");
        let (width, style) = match (
            resolver.resolve(node, &width_prop),
            resolver.resolve(node, &style_prop),
        ) {
            (Ok(Some(width)), Ok(Some(style))) => (width, style),
            (Err(err), _) | (_, Err(err)) => {
                skipped.push(NormalizationSkip {
                    node,
                    property: err.property,
                    reason: err.reason,
                });
                continue;
            }
            _ => continue,
        };

        let style = style.trim();
        if style.eq_ignore_ascii_case("none") || style.eq_ignore_ascii_case("hidden") {
            continue;
        }
        let is_zero = width
            .trim()
            .trim_end_matches("px")
            .trim()
            .parse::<f32>()
            .map(|w| w <= 0.0)
            .unwrap_or(false);
        if is_zero {
            continue;
        }

        let shorthand = match record.get(&format!("border-{edge}-color")) {
            Some(color) => format!("{} {} {}", width.trim(), style, color),
            None => format!("{} {}", width.trim(), style),
        };
        if !contains_modern_color_function(&shorthand) {
            record.insert(format!("border-{edge}"), shorthand);
        }
    }
}
