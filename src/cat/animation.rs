/// Looping sprite sequences, one per pose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SpriteSet {
    Walk,
    Sit,
    Sleep,
    Pounce,
    Heart,
}

/// One sprite frame: text rows drawn top to bottom.
pub type SpriteFrame = &'static [&'static str];

const WALK: &[SpriteFrame] = &[
    &[r"  /\_/\", " ( o.o )", " > ^ < "],
    &[r"  /\_/\", " ( o.o )", "  > ^ <"],
];
const SIT: &[SpriteFrame] = &[&[r"  /\_/\", " ( ◕ᴥ◕ )", " (u   u)", "  || ||"]];
const SLEEP: &[SpriteFrame] = &[&[r"  /\_/\", " ( -.- ) zZ", " (u   u)", "  || ||"]];
const POUNCE: &[SpriteFrame] = &[&[r"  /\_/\", " ( >0< )", "  >> <<"]];
const HEART: &[SpriteFrame] = &[&[r"  /\_/\", " ( ◕‿◕ )♥", " (u   u)"]];

impl SpriteSet {
    pub fn frames(self) -> &'static [SpriteFrame] {
        match self {
            SpriteSet::Walk => WALK,
            SpriteSet::Sit => SIT,
            SpriteSet::Sleep => SLEEP,
            SpriteSet::Pounce => POUNCE,
            SpriteSet::Heart => HEART,
        }
    }

    pub fn frame_count(self) -> usize {
        self.frames().len()
    }

    /// Frame for an animation index, wrapping past the end of the set.
    pub fn frame(self, index: usize) -> SpriteFrame {
        let frames = self.frames();
        frames[index % frames.len()]
    }

    pub fn label(self) -> &'static str {
        match self {
            SpriteSet::Walk => "walk",
            SpriteSet::Sit => "sit",
            SpriteSet::Sleep => "sleep",
            SpriteSet::Pounce => "pounce",
            SpriteSet::Heart => "heart",
        }
    }
}

/// Animation cycle position for the cat.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnimationState {
    pub frame: usize,
    /// Ticks since the frame last advanced.
    pub elapsed: u32,
}

impl AnimationState {
    /// Count a moving tick; step to the next frame every `period` ticks.
    pub fn advance(&mut self, period: u32, set: SpriteSet) {
        self.elapsed += 1;
        if self.elapsed >= period.max(1) {
            self.elapsed = 0;
            self.frame = (self.frame + 1) % set.frame_count();
        }
    }
}
