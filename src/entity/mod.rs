//! Entity model: mechs, atoms, operators, faucets and sinks

pub mod atom;
pub mod facility;
pub mod mech;
pub mod operator;

pub use atom::{Atom, AtomKind, AtomStatus};
pub use facility::{Faucet, Sink};
pub use mech::{Mech, MechKind, MechStatus};
pub use operator::{Operator, OperatorKind, Recipe};
