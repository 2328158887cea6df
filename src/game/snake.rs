use std::collections::VecDeque;

use super::board::Coord;

/// The snake body as an ordered sequence of cells, tail at the front and
/// head at the back
///
/// Invariants: no coordinate appears twice (self-collision ends the game
/// before that could happen), and every coordinate here is marked
/// occupied-by-snake on the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    body: VecDeque<Coord>,
}

impl Snake {
    /// A length-1 snake sitting on `head`
    pub fn new(head: Coord) -> Self {
        let mut body = VecDeque::new();
        body.push_back(head);
        Self { body }
    }

    pub fn head(&self) -> Coord {
        *self.body.back().expect("snake body is never empty")
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Tail-to-head walk over the body
    pub fn cells(&self) -> impl Iterator<Item = Coord> + '_ {
        self.body.iter().copied()
    }

    pub fn contains(&self, coord: Coord) -> bool {
        self.body.contains(&coord)
    }

    /// Would entering `coord` hit the body?
    ///
    /// The tail cell is excluded: it is vacated in the same step, so moving
    /// onto it is legal. A head landing on food never overlaps the body
    /// (food is only spawned on free cells), so growth needs no special
    /// case here.
    pub fn hits_on_entry(&self, coord: Coord) -> bool {
        self.body.iter().skip(1).any(|&c| c == coord)
    }

    /// Push `new_head`; unless `grow`, pop the tail and return it so the
    /// caller can release its board cell
    pub fn advance(&mut self, new_head: Coord, grow: bool) -> Option<Coord> {
        self.body.push_back(new_head);
        if grow {
            None
        } else {
            self.body.pop_front()
        }
    }
}
