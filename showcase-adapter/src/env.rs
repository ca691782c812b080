use alloc::collections::BTreeMap;

use showcase::{Rect, Viewport};

/// Opaque identifier of a renderable region, assigned by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegionId(pub u64);

/// Ambient display queries the stage depends on.
///
/// A browser host backs this with the window and element bounding boxes; tests use
/// [`ManualEnvironment`].
pub trait Environment {
    fn viewport(&self) -> Viewport;

    /// Current vertical scroll position of the page.
    fn scroll_y(&self) -> f64;

    /// Bounding rectangle of `region` relative to the viewport, or `None` when the region is not
    /// currently laid out.
    fn region_rect(&self, region: RegionId) -> Option<Rect>;
}

/// An in-memory environment with document-space regions.
///
/// Regions are stored in page coordinates; `region_rect` shifts them by the current scroll
/// position, the way a bounding client rect moves as the page scrolls.
#[derive(Clone, Debug, Default)]
pub struct ManualEnvironment {
    viewport: Viewport,
    scroll_y: f64,
    regions: BTreeMap<RegionId, Rect>,
}

impl ManualEnvironment {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            scroll_y: 0.0,
            regions: BTreeMap::new(),
        }
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn set_scroll_y(&mut self, scroll_y: f64) {
        self.scroll_y = scroll_y;
    }

    /// Places (or moves) a region at `rect` in page coordinates.
    pub fn place_region(&mut self, region: RegionId, rect: Rect) {
        self.regions.insert(region, rect);
    }

    pub fn remove_region(&mut self, region: RegionId) -> Option<Rect> {
        self.regions.remove(&region)
    }
}

impl Environment for ManualEnvironment {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn region_rect(&self, region: RegionId) -> Option<Rect> {
        let r = self.regions.get(&region)?;
        Some(Rect::new(r.x, r.y - self.scroll_y, r.width, r.height))
    }
}
