#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum TransitionPhase {
    #[default]
    Idle,    // No transition; layout is natural
    Armed,   // Pairs matched and layout frozen, no step applied yet
    Running, // Step timer pending, interpolation under way
}
