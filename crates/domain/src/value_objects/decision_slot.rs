//! Named decision slots
//!
//! Every perturbation decision is addressed by a `(seed, index)` pair. Handing
//! out bare integers at call sites makes collisions easy, so call sites name a
//! [`DecisionSlot`] instead and the slot maps itself to an index.
//!
//! Index layout:
//!
//! - configuration fields are pinned to `1..=4` and must never move, otherwise
//!   existing seeds stop replaying the same configuration;
//! - every other family `f` with instance `n` maps to
//!   `(f << 33) | (n << 1) | 1`.
//!
//! Family indices are odd and start at `2^33`, so they are disjoint from the
//! pinned fields, from each other, and from the jitter draw of a latency
//! decision (which uses `index * 2`, always even).

/// Bit offset separating slot families
const FAMILY_SHIFT: u32 = 33;

/// A logically distinct perturbation decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecisionSlot {
    /// Whether the unsolicited overlay is armed for the session
    PopupOverlay,
    /// Base delay added to modal animations
    ModalDelay,
    /// Base delay added to toast notifications
    ToastDelay,
    /// Base delay added to skeleton loaders
    SkeletonDelay,
    /// Simulated network delay at step `n` of an operation
    NetworkDelay(u32),
    /// Simulated failure check at step `n` of an operation
    ErrorTrigger(u32),
    /// Opening animation of modal instance `n`
    ModalAnimation(u32),
    /// Whether a toast is shown at all
    ToastVisibility,
    /// When the toast appears
    ToastTiming,
    /// Which kind of toast is shown
    ToastKind,
    /// Spin duration of spinner instance `n`
    SpinnerDuration(u32),
    /// Loading time of skeleton instance `n`
    SkeletonLoading(u32),
    /// Whether overlay instance `n` is shown
    PopupVisibility(u32),
    /// When overlay instance `n` appears
    PopupTiming(u32),
}

impl DecisionSlot {
    /// Map the slot to its decision index
    pub const fn index(self) -> u64 {
        match self {
            Self::PopupOverlay => 1,
            Self::ModalDelay => 2,
            Self::ToastDelay => 3,
            Self::SkeletonDelay => 4,
            Self::NetworkDelay(n) => family(1, n),
            Self::ErrorTrigger(n) => family(2, n),
            Self::ModalAnimation(n) => family(3, n),
            Self::ToastVisibility => family(4, 0),
            Self::ToastTiming => family(4, 1),
            Self::ToastKind => family(4, 2),
            Self::SpinnerDuration(n) => family(5, n),
            Self::SkeletonLoading(n) => family(6, n),
            Self::PopupVisibility(n) => family(7, n),
            Self::PopupTiming(n) => family(8, n),
        }
    }
}

impl From<DecisionSlot> for u64 {
    fn from(slot: DecisionSlot) -> Self {
        slot.index()
    }
}

const fn family(family: u64, instance: u32) -> u64 {
    (family << FAMILY_SHIFT) | ((instance as u64) << 1) | 1
}
