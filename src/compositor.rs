//! Creature compositing: template draw, tint pass, accessory overlay
//!
//! A render runs in three ordered stages:
//!
//! 1. load the species template, clear the surface and draw it at the origin
//! 2. recolor near-white pixels with the creature's tint
//! 3. draw the accessory overlay, if any
//!
//! The accessory load is joined with the "draw + tint" stage and its draw is
//! sequenced after the join, so an overlay can never be tinted no matter
//! which load finishes first. Loads only interleave when the loader yields;
//! [`DirectoryAssets`](crate::assets::DirectoryAssets) decodes synchronously,
//! so with disk assets the two loads simply run back to back.

use futures::future::join;
use image::RgbaImage;
use thiserror::Error;
use tracing::{debug, warn};

use crate::assets::{AssetError, AssetKey, AssetLoader};
use crate::color::ColorError;
use crate::models::CreatureDescriptor;
use crate::surface::{DisplaySurface, PixelCanvas};
use crate::tint::tint_near_white;

/// Extra attempts made after a failed asset load
pub const DEFAULT_RETRIES: u32 = 1;

/// Error when a creature cannot be displayed.
///
/// Rendering failures are never fatal: the caller keeps its logical state and
/// reports the display as unavailable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// An image could not be loaded after all retries
    #[error(transparent)]
    Asset(#[from] AssetError),
    /// The descriptor's tint is not a valid hex color
    #[error("invalid tint color: {0}")]
    Color(#[from] ColorError),
}

/// Draws creatures and egg sprites onto a [`DisplaySurface`].
#[derive(Debug, Clone)]
pub struct Compositor<L> {
    loader: L,
    retries: u32,
}

impl<L: AssetLoader> Compositor<L> {
    pub fn new(loader: L) -> Self {
        Self { loader, retries: DEFAULT_RETRIES }
    }

    /// Set how many times a failed load is retried before giving up.
    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    /// Clear the surface and draw an untinted sprite (egg states).
    pub async fn show_sprite<S: DisplaySurface>(
        &self,
        key: AssetKey,
        surface: &mut S,
    ) -> Result<(), RenderError> {
        let image = self.fetch(key).await?;
        surface.clear();
        surface.draw_image(&image);
        Ok(())
    }

    /// Render `creature` onto `surface` and select its background.
    pub async fn render<S: DisplaySurface>(
        &self,
        creature: &CreatureDescriptor,
        surface: &mut S,
    ) -> Result<(), RenderError> {
        let target = creature.tint_color()?;
        let template_key = AssetKey::Species(creature.species);

        let body = async {
            let template = self.fetch(template_key).await?;
            surface.clear();
            surface.draw_image(&template);

            let mut frame = surface.read_pixels();
            let recolored = tint_near_white(&mut frame, target);
            surface.write_pixels(&frame);
            Ok::<usize, AssetError>(recolored)
        };

        let overlay = async {
            match creature.accessory {
                Some(accessory) => self.fetch(AssetKey::Accessory(accessory)).await.map(Some),
                None => Ok(None),
            }
        };

        let (body, overlay) = join(body, overlay).await;
        // The previous creature's scene must not outlive a failed draw
        surface.set_background(creature.background);
        let recolored = body?;

        if let Some(image) = overlay? {
            surface.draw_image(&image);
        }

        debug!(
            id = creature.id,
            species = %creature.species,
            color = %creature.color_name,
            recolored,
            "rendered creature"
        );
        Ok(())
    }

    /// Render `creature` onto a fresh canvas, for collection listings.
    pub async fn thumbnail(&self, creature: &CreatureDescriptor) -> Result<RgbaImage, RenderError> {
        let mut canvas = PixelCanvas::new();
        self.render(creature, &mut canvas).await?;
        Ok(canvas.into_pixels())
    }

    async fn fetch(&self, key: AssetKey) -> Result<RgbaImage, AssetError> {
        let mut attempt = 0;
        loop {
            match self.loader.load(key).await {
                Ok(image) => return Ok(image),
                Err(e) if attempt < self.retries => {
                    attempt += 1;
                    warn!(asset = %key, attempt, error = %e, "asset load failed, retrying");
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::MemoryAssets;
    use crate::models::{Accessory, Background, Species};
    use futures::executor::block_on;
    use image::Rgba;
    use std::cell::{Cell, RefCell};
    use std::future::Future;
    use std::pin::Pin;
    use std::rc::Rc;
    use std::task::{Context, Poll};

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
    const OUTLINE: Rgba<u8> = Rgba([0, 0, 0, 255]);
    const GOLD: Rgba<u8> = Rgba([250, 250, 240, 255]);

    fn creature(accessory: Option<Accessory>) -> CreatureDescriptor {
        CreatureDescriptor {
            id: 1,
            species: Species::Cat,
            color_hex: "#FF004D".to_string(),
            color_name: "Crimson".to_string(),
            accessory,
            background: Background::Grass,
            captured_at: "1/1/2026".to_string(),
        }
    }

    /// White body with an outline column on the left
    fn cat_template() -> RgbaImage {
        let mut img = RgbaImage::from_pixel(32, 32, WHITE);
        for y in 0..32 {
            img.put_pixel(0, y, OUTLINE);
        }
        img
    }

    /// Near-white crown in the top row only
    fn crown() -> RgbaImage {
        let mut img = RgbaImage::new(32, 32);
        for x in 0..32 {
            img.put_pixel(x, 0, GOLD);
        }
        img
    }

    fn assets() -> MemoryAssets {
        MemoryAssets::new()
            .with(AssetKey::Species(Species::Cat), cat_template())
            .with(AssetKey::Accessory(Accessory::Crown), crown())
            .with(AssetKey::Egg, RgbaImage::from_pixel(32, 32, WHITE))
    }

    /// Yields to the executor `n` times before completing.
    struct YieldTimes(u32);

    impl Future for YieldTimes {
        type Output = ();
        fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
            if self.0 == 0 {
                return Poll::Ready(());
            }
            self.0 -= 1;
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    }

    /// Template loads slowly, everything else instantly; records load order.
    struct SlowTemplate {
        inner: MemoryAssets,
        log: Rc<RefCell<Vec<AssetKey>>>,
    }

    impl AssetLoader for SlowTemplate {
        async fn load(&self, key: AssetKey) -> Result<RgbaImage, AssetError> {
            if matches!(key, AssetKey::Species(_)) {
                YieldTimes(3).await;
            }
            self.log.borrow_mut().push(key);
            self.inner.load(key).await
        }
    }

    /// Fails the first `failures` loads.
    struct Flaky {
        inner: MemoryAssets,
        failures: Cell<u32>,
    }

    impl AssetLoader for Flaky {
        async fn load(&self, key: AssetKey) -> Result<RgbaImage, AssetError> {
            if self.failures.get() > 0 {
                self.failures.set(self.failures.get() - 1);
                return Err(AssetError::Decode { key, message: "truncated".to_string() });
            }
            self.inner.load(key).await
        }
    }

    #[test]
    fn test_render_tints_body_keeps_outline() {
        let compositor = Compositor::new(assets());
        let mut canvas = PixelCanvas::new();

        block_on(compositor.render(&creature(None), &mut canvas)).unwrap();

        assert_eq!(canvas.pixels().get_pixel(0, 5), &OUTLINE);
        assert_eq!(canvas.pixels().get_pixel(5, 5), &Rgba([255, 0, 77, 255]));
        assert_eq!(canvas.background(), Some(Background::Grass));
    }

    #[test]
    fn test_accessory_is_never_tinted() {
        let compositor = Compositor::new(assets());
        let mut canvas = PixelCanvas::new();

        block_on(compositor.render(&creature(Some(Accessory::Crown)), &mut canvas)).unwrap();

        assert_eq!(canvas.pixels().get_pixel(10, 0), &GOLD);
        assert_eq!(canvas.pixels().get_pixel(10, 1), &Rgba([255, 0, 77, 255]));
    }

    #[test]
    fn test_overlay_waits_for_tint_when_accessory_loads_first() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let loader = SlowTemplate { inner: assets(), log: Rc::clone(&log) };
        let compositor = Compositor::new(loader);
        let mut canvas = PixelCanvas::new();

        block_on(compositor.render(&creature(Some(Accessory::Crown)), &mut canvas)).unwrap();

        // accessory finished loading before the template did
        assert_eq!(
            *log.borrow(),
            vec![AssetKey::Accessory(Accessory::Crown), AssetKey::Species(Species::Cat)]
        );
        // and still sits untinted on top
        assert_eq!(canvas.pixels().get_pixel(3, 0), &GOLD);
    }

    #[test]
    fn test_render_replaces_previous_frame() {
        let compositor = Compositor::new(assets());
        let mut canvas = PixelCanvas::new();
        block_on(compositor.render(&creature(Some(Accessory::Crown)), &mut canvas)).unwrap();
        block_on(compositor.render(&creature(None), &mut canvas)).unwrap();

        assert_eq!(canvas.pixels().get_pixel(10, 0), &Rgba([255, 0, 77, 255]));
    }

    #[test]
    fn test_show_sprite_is_untinted() {
        let compositor = Compositor::new(assets());
        let mut canvas = PixelCanvas::new();
        block_on(compositor.show_sprite(AssetKey::Egg, &mut canvas)).unwrap();
        assert!(canvas.pixels().pixels().all(|p| *p == WHITE));
    }

    #[test]
    fn test_single_failure_is_retried() {
        let loader = Flaky { inner: assets(), failures: Cell::new(1) };
        let compositor = Compositor::new(loader);
        let mut canvas = PixelCanvas::new();
        assert!(block_on(compositor.render(&creature(None), &mut canvas)).is_ok());
    }

    #[test]
    fn test_persistent_failure_surfaces_error() {
        let loader = Flaky { inner: assets(), failures: Cell::new(2) };
        let compositor = Compositor::new(loader);
        let mut canvas = PixelCanvas::new();

        let err = block_on(compositor.render(&creature(None), &mut canvas)).unwrap_err();
        assert!(matches!(err, RenderError::Asset(AssetError::Decode { .. })));
    }

    #[test]
    fn test_zero_retries() {
        let loader = Flaky { inner: assets(), failures: Cell::new(1) };
        let compositor = Compositor::new(loader).with_retries(0);
        let mut canvas = PixelCanvas::new();
        assert!(block_on(compositor.show_sprite(AssetKey::Egg, &mut canvas)).is_err());
    }

    #[test]
    fn test_missing_accessory_keeps_tinted_body() {
        let loader = MemoryAssets::new().with(AssetKey::Species(Species::Cat), cat_template());
        let compositor = Compositor::new(loader);
        let mut canvas = PixelCanvas::new();

        let err = block_on(compositor.render(&creature(Some(Accessory::Hat)), &mut canvas)).unwrap_err();

        assert_eq!(err, RenderError::Asset(AssetError::NotFound(AssetKey::Accessory(Accessory::Hat))));
        assert_eq!(canvas.pixels().get_pixel(5, 5), &Rgba([255, 0, 77, 255]));
    }

    #[test]
    fn test_bad_color_rejected_before_drawing() {
        let compositor = Compositor::new(assets());
        let mut canvas = PixelCanvas::new();
        let mut bad = creature(None);
        bad.color_hex = "crimson".to_string();

        let err = block_on(compositor.render(&bad, &mut canvas)).unwrap_err();
        assert_eq!(err, RenderError::Color(ColorError::MissingHash));
        assert_eq!(canvas, PixelCanvas::new());
    }

    #[test]
    fn test_missing_template_still_selects_background() {
        let compositor = Compositor::new(MemoryAssets::new());
        let mut canvas = PixelCanvas::new();
        canvas.set_background(Background::Space);

        let err = block_on(compositor.render(&creature(None), &mut canvas)).unwrap_err();

        assert_eq!(err, RenderError::Asset(AssetError::NotFound(AssetKey::Species(Species::Cat))));
        assert_eq!(canvas.background(), Some(Background::Grass));
    }

    #[test]
    fn test_background_selected_by_name_not_loaded() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let loader = SlowTemplate { inner: assets(), log: Rc::clone(&log) };
        let compositor = Compositor::new(loader);
        let mut canvas = PixelCanvas::new();

        block_on(compositor.render(&creature(None), &mut canvas)).unwrap();

        assert_eq!(*log.borrow(), vec![AssetKey::Species(Species::Cat)]);
        assert_eq!(canvas.background(), Some(Background::Grass));
    }

    #[test]
    fn test_disk_assets_keep_overlay_untinted() {
        let dir = tempfile::tempdir().unwrap();
        let loader = crate::assets::DirectoryAssets::new(dir.path());
        cat_template().save(loader.path_for(AssetKey::Species(Species::Cat))).unwrap();
        crown().save(loader.path_for(AssetKey::Accessory(Accessory::Crown))).unwrap();

        let compositor = Compositor::new(loader);
        let mut canvas = PixelCanvas::new();
        block_on(compositor.render(&creature(Some(Accessory::Crown)), &mut canvas)).unwrap();

        assert_eq!(canvas.pixels().get_pixel(3, 0), &GOLD);
        assert_eq!(canvas.pixels().get_pixel(3, 1), &Rgba([255, 0, 77, 255]));
        assert_eq!(canvas.pixels().get_pixel(0, 1), &OUTLINE);
    }

    #[test]
    fn test_thumbnail() {
        let compositor = Compositor::new(assets());
        let thumb = block_on(compositor.thumbnail(&creature(None))).unwrap();
        assert_eq!(thumb.dimensions(), (32, 32));
        assert_eq!(thumb.get_pixel(31, 31), &Rgba([255, 0, 77, 255]));
    }
}
