//! Static sprite atlas tables.
//!
//! Both sprite sheets have a fixed grid layout, so their frame rectangles are
//! compile-time constants rather than loaded metadata. Entities hold a `SpriteRef`
//! (sheet + table index) and resolve it against these tables whenever they need a
//! size or a UV rect, so there is never a stale pointer into a table.
//!
//! Ship sheet (80x48): five banking columns (hard-left, left, stationary, right,
//! hard-right), row 0 is animation frame 1, row 1 is frame 2. Each cell is 16x24.
//! Laser bolt sheet (32x32): two 16x32 frames side by side.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteRect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl SpriteRect {
    const fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// Normalized `[u0, v0, u1, v1]` within a texture of the given size, v growing
    /// downwards like the image rows.
    pub fn uv(&self, texture_w: u32, texture_h: u32) -> [f32; 4] {
        let tw = texture_w.max(1) as f32;
        let th = texture_h.max(1) as f32;
        [
            self.x as f32 / tw,
            self.y as f32 / th,
            (self.x + self.w) as f32 / tw,
            (self.y + self.h) as f32 / th,
        ]
    }
}

/// Ship table order. The discriminant is the index into `SHIP_SPRITES`.
/// Second frames are reached by offset from the first, never named directly.
#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(usize)]
pub enum ShipSprite {
    Stationary1,
    Stationary2,
    BankLeft1,
    BankLeft2,
    BankHardLeft1,
    BankHardLeft2,
    BankRight1,
    BankRight2,
    BankHardRight1,
    BankHardRight2,
}

const SHIP_FRAME_W: u32 = 16;
const SHIP_FRAME_H: u32 = 24;
const PROJECTILE_FRAME_W: u32 = 16;
const PROJECTILE_FRAME_H: u32 = 32;

static SHIP_SPRITES: [SpriteRect; 10] = [
    // Stationary
    SpriteRect::new(32, 0, SHIP_FRAME_W, SHIP_FRAME_H),
    SpriteRect::new(32, 24, SHIP_FRAME_W, SHIP_FRAME_H),
    // Bank left
    SpriteRect::new(16, 0, SHIP_FRAME_W, SHIP_FRAME_H),
    SpriteRect::new(16, 24, SHIP_FRAME_W, SHIP_FRAME_H),
    // Bank hard left
    SpriteRect::new(0, 0, SHIP_FRAME_W, SHIP_FRAME_H),
    SpriteRect::new(0, 24, SHIP_FRAME_W, SHIP_FRAME_H),
    // Bank right
    SpriteRect::new(48, 0, SHIP_FRAME_W, SHIP_FRAME_H),
    SpriteRect::new(48, 24, SHIP_FRAME_W, SHIP_FRAME_H),
    // Bank hard right
    SpriteRect::new(64, 0, SHIP_FRAME_W, SHIP_FRAME_H),
    SpriteRect::new(64, 24, SHIP_FRAME_W, SHIP_FRAME_H),
];

static PROJECTILE_SPRITES: [SpriteRect; 2] = [
    SpriteRect::new(0, 0, PROJECTILE_FRAME_W, PROJECTILE_FRAME_H),
    SpriteRect::new(16, 0, PROJECTILE_FRAME_W, PROJECTILE_FRAME_H),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteSheet {
    Ship,
    Projectile,
}

impl SpriteSheet {
    /// Draw order: the ship is blitted before the projectiles.
    pub const ALL: [SpriteSheet; 2] = [SpriteSheet::Ship, SpriteSheet::Projectile];

    pub fn rects(self) -> &'static [SpriteRect] {
        match self {
            Self::Ship => &SHIP_SPRITES,
            Self::Projectile => &PROJECTILE_SPRITES,
        }
    }

    /// Pixel size of the sheet image the tables were authored against.
    pub fn expected_size(self) -> (u32, u32) {
        match self {
            Self::Ship => (80, 48),
            Self::Projectile => (32, 32),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Ship => "ship",
            Self::Projectile => "laser-bolts",
        }
    }

    /// Check that a loaded sheet image contains every rect of this table.
    pub fn validate_texture_size(self, width: u32, height: u32) -> Result<(), String> {
        if width == 0 || height == 0 {
            return Err(format!(
                "Atlas validation failed: '{}' texture is empty",
                self.label()
            ));
        }
        for (index, rect) in self.rects().iter().enumerate() {
            if rect.x + rect.w > width || rect.y + rect.h > height {
                return Err(format!(
                    "Atlas validation failed: '{}' frame {} ({}x{} at {},{}) exceeds {}x{} texture",
                    self.label(),
                    index,
                    rect.w,
                    rect.h,
                    rect.x,
                    rect.y,
                    width,
                    height
                ));
            }
        }
        Ok(())
    }
}

/// Index into one of the static atlas tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteRef {
    pub sheet: SpriteSheet,
    pub index: usize,
}

impl SpriteRef {
    pub fn ship(sprite: ShipSprite) -> Self {
        Self {
            sheet: SpriteSheet::Ship,
            index: sprite as usize,
        }
    }

    pub fn rect(self) -> SpriteRect {
        let rects = self.sheet.rects();
        rects[self.index % rects.len()]
    }
}

/// Banking pose of the ship. Each pose owns two consecutive animation frames in
/// the ship table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShipPose {
    Stationary,
    #[allow(dead_code)]
    BankLeft,
    BankHardLeft,
    #[allow(dead_code)]
    BankRight,
    BankHardRight,
}

impl ShipPose {
    /// Any horizontal motion shows the hard bank; the gentle bank frames are in
    /// the sheet but the controls never select them.
    pub fn from_velocity_x(velocity_x: i32) -> Self {
        match velocity_x {
            vx if vx < 0 => Self::BankHardLeft,
            vx if vx > 0 => Self::BankHardRight,
            _ => Self::Stationary,
        }
    }

    fn first_frame(self) -> ShipSprite {
        match self {
            Self::Stationary => ShipSprite::Stationary1,
            Self::BankLeft => ShipSprite::BankLeft1,
            Self::BankHardLeft => ShipSprite::BankHardLeft1,
            Self::BankRight => ShipSprite::BankRight1,
            Self::BankHardRight => ShipSprite::BankHardRight1,
        }
    }

    pub fn sprite(self, animation_frame: usize) -> SpriteRef {
        let mut sprite = SpriteRef::ship(self.first_frame());
        sprite.index += animation_frame % 2;
        sprite
    }
}

pub fn projectile_sprite(animation_frame: usize) -> SpriteRef {
    SpriteRef {
        sheet: SpriteSheet::Projectile,
        index: animation_frame % PROJECTILE_SPRITES.len(),
    }
}
