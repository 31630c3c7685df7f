use folio_capture::memory::{DetachedTree, MemoryHost, NodeId, PixmapRasterizer, VisualNode};
use folio_capture::{
    CaptureConfig, CaptureError, RasterCapture, RasterError, Rasterizer, StabilizationPolicy,
    SurfaceHost,
};
use folio_style::{
    contains_modern_color_function, NormalizedStyles, StyleNormalizer, StyleResolver,
    COLOR_PROPERTIES,
};
use folio_types::Bitmap;
use std::time::Duration;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn persona_card() -> VisualNode {
    VisualNode::new()
        .style("padding", "16px")
        .style("background-color", "rgb(255, 255, 255)")
        .child(
            VisualNode::new()
                .style("background-color", "oklch(0.205 0 0)")
                .style("color", "oklch(0.985 0 0)")
                .style("padding", "8px")
                .text("Ada Lovelace"),
        )
        .child(
            VisualNode::new()
                .style("border-bottom-width", "1px")
                .style("border-bottom-style", "solid")
                .style("border-bottom-color", "lab(90% 0 0)")
                .text("Analyst, London"),
        )
        .child(VisualNode::new().style("box-shadow", "0 1px 2px oklab(0 0 0 / 0.1)"))
}

/// Reads colors straight off the surface, the way a renderer that re-parses
/// authored CSS would.
struct ReparsingRasterizer;

impl Rasterizer<DetachedTree> for ReparsingRasterizer {
    fn rasterize(
        &self,
        surface: &DetachedTree,
        _styles: &NormalizedStyles<NodeId>,
        _scale: f32,
    ) -> Result<Bitmap, RasterError> {
        for node in surface.descendants() {
            for property in COLOR_PROPERTIES {
                if let Ok(Some(value)) = surface.resolve(node, property) {
                    if contains_modern_color_function(&value) {
                        return Err(RasterError::UnsupportedColor {
                            property: property.to_string(),
                            value,
                        });
                    }
                }
            }
        }
        Ok(Bitmap::new(vec![1], 1, 1))
    }
}

#[tokio::test]
async fn test_modern_background_is_dropped_and_capture_succeeds() {
    init_logger();
    let mut host = MemoryHost::new();
    let target = host.insert(persona_card());
    let capture =
        RasterCapture::new(host, PixmapRasterizer::default(), CaptureConfig::default()).unwrap();

    let bitmap = capture.capture(&target).await.unwrap();

    assert!(!bitmap.is_empty());
    // 800px viewport at the default 2x device scale.
    assert_eq!(bitmap.width, 1600);
    assert_eq!(&bitmap.data[1..4], b"PNG");
    assert_eq!(capture.host().mounted_count(), 0);
    assert_eq!(capture.host().total_mounts(), 1);
}

#[tokio::test]
async fn test_waits_for_configured_paint_cycles() {
    init_logger();
    let mut host = MemoryHost::new();
    let target = host.insert(persona_card());
    let config = CaptureConfig {
        stabilization: StabilizationPolicy {
            frames: 3,
            settle_delay: Duration::from_millis(5),
        },
        ..Default::default()
    };
    let capture = RasterCapture::new(host, PixmapRasterizer::default(), config).unwrap();

    capture.capture(&target).await.unwrap();

    assert_eq!(capture.host().frames_elapsed(), 3);
}

#[tokio::test]
async fn test_normalizer_gap_is_reported_and_surface_released() {
    init_logger();
    let mut host = MemoryHost::new();
    let target = host.insert(persona_card());
    let capture =
        RasterCapture::new(host, ReparsingRasterizer, CaptureConfig::default()).unwrap();

    let err = capture.capture(&target).await.unwrap_err();

    assert_eq!(err.cause(), "unsupported-color");
    assert!(matches!(err, CaptureError::UnsupportedColor { .. }));
    assert_eq!(capture.host().mounted_count(), 0);
}

#[tokio::test]
async fn test_unknown_target_fails_to_detach() {
    init_logger();
    let mut other = MemoryHost::new();
    let _ = other.insert(VisualNode::new());
    let stranger = other.insert(VisualNode::new());

    let mut host = MemoryHost::new();
    host.insert(VisualNode::new().text("only one"));
    let capture =
        RasterCapture::new(host, PixmapRasterizer::default(), CaptureConfig::default()).unwrap();

    let err = capture.capture(&stranger).await.unwrap_err();
    assert_eq!(err.cause(), "detach");
    assert_eq!(capture.host().mounted_count(), 0);
}

#[tokio::test]
async fn test_live_tree_is_never_mutated() {
    init_logger();
    let mut host = MemoryHost::new();
    let target = host.insert(persona_card());
    let before = host.target(target).cloned();
    let capture =
        RasterCapture::new(host, PixmapRasterizer::default(), CaptureConfig::default()).unwrap();

    capture.capture(&target).await.unwrap();

    assert_eq!(capture.host().target(target).cloned(), before);
}

#[test]
fn test_rejects_non_positive_scale() {
    let result = RasterCapture::new(
        MemoryHost::new(),
        PixmapRasterizer::default(),
        CaptureConfig {
            scale_factor: 0.0,
            ..Default::default()
        },
    );
    assert!(matches!(result, Err(CaptureError::InvalidConfig(_))));
}

#[test]
fn test_normalization_of_detached_tree_is_idempotent_and_clean() {
    init_logger();
    let mut host = MemoryHost::new();
    let target = host.insert(persona_card());
    let mut tree = host.mount_detached(&target).unwrap();

    let normalizer = StyleNormalizer::default();
    let first = normalizer.normalize(&mut tree);
    let second = normalizer.normalize(&mut tree);

    assert_eq!(first.records(), second.records());
    assert!(first.values().all(|v| !contains_modern_color_function(v)));
    assert_eq!(first.dropped().len(), 4);
    let heading = tree.children(tree.root())[0];
    assert_eq!(first.get(heading).unwrap().get("color"), Some("rgb(0, 0, 0)"));
    assert!(!first.get(heading).unwrap().contains("background-color"));

    host.unmount(&mut tree);
    assert_eq!(host.mounted_count(), 0);
}
