use super::super::{Cell, MazeMaker};

pub trait Backtrack {
    fn backtrack(&mut self);
}

impl Backtrack for MazeMaker {
    fn backtrack(&mut self) {
        if self.size == 0 {
            return;
        }

        let origin = Cell { x: 0, y: 0 };
        self.visit_cell(origin);
        let mut stack = vec![origin];

        while let Some(curr) = stack.pop() {
            if let Some((direction, next)) = self.pick_neighbor(curr) {
                stack.push(curr);
                self.remove_wall_between(curr, direction, next);
                self.visit_cell(next);
                stack.push(next);
            }
        }
    }
}
