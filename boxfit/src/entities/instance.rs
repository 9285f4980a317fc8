use crate::entities::{Container, Piece};

/// A set of pieces and the containers they have to be packed into.
#[derive(Clone, Debug)]
pub struct Instance {
    pub name: String,
    pub pieces: Vec<Piece>,
    pub containers: Vec<Container>,
}

impl Instance {
    pub fn new(name: impl Into<String>, pieces: Vec<Piece>, containers: Vec<Container>) -> Self {
        Self {
            name: name.into(),
            pieces,
            containers,
        }
    }

    /// Empties all containers and forgets the placement of all pieces, so a new run can start.
    pub fn reset(&mut self) {
        self.containers.iter_mut().for_each(Container::reset);
        self.pieces.iter_mut().for_each(Piece::unassign);
    }

    pub fn piece(&self, id: usize) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.id == id)
    }

    pub fn container(&self, id: usize) -> Option<&Container> {
        self.containers.iter().find(|c| c.id == id)
    }
}
