//! Staff module: employee roster and work shifts.
//!
//! Pure domain logic; persistence lives in `stockbook-infra`.

pub mod employee;
pub mod roster;

pub use employee::{Employee, NewEmployee, Shift};
pub use roster::Roster;
