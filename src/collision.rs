use crate::board::Board;
use crate::config::BoundaryPolicy;
use crate::food::Food;
use crate::snake::{Segment, Snake};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Collision {
    AteFood,
    SelfHit,
    BoundaryHit,
    /// The head left the interior in wrap mode and belongs at `to`.
    Wrapped { to: Segment },
    None,
}

impl Collision {
    pub fn is_fatal(self) -> bool {
        matches!(self, Collision::SelfHit | Collision::BoundaryHit)
    }
}

/// Classifies where the head ended up. Food wins over the body and the body
/// over the frame, since all three look at the same cell.
pub fn classify(snake: &Snake, food: &Food, board: &Board, policy: BoundaryPolicy) -> Collision {
    let head = snake.head();

    if food.is_at(head) {
        return Collision::AteFood;
    }

    if snake.bites_itself() {
        return Collision::SelfHit;
    }

    if !board.is_interior(head) {
        return match policy {
            BoundaryPolicy::Bounded => Collision::BoundaryHit,
            BoundaryPolicy::Wrap => Collision::Wrapped { to: board.wrap(head) },
        };
    }

    Collision::None
}
