//! # AutoApply Protocols
//!
//! Interface definitions shared by the AutoApply crates.
//! Contains only traits, plain data types and errors - no implementations.
//!
//! ## Core Traits
//!
//! - [`FormPage`] - The live, continuously-mutating host document
//! - [`NotificationSink`] - Fire-and-forget consumer of completion notices
//!
//! ## Messages
//!
//! - [`ControlRequest`] / [`ControlResponse`] - start / stop / status round trips
//! - [`Notification`] - completion notices emitted by a run

pub mod error;
pub mod message;
pub mod page;
pub mod sink;
pub mod widget;

pub use error::{PageError, ProfileError, RunError};
pub use message::{Confirmation, ControlRequest, ControlResponse, Notification, RunId};
pub use page::{Affordance, AffordanceState, DomEvent, ElementRef, FormPage};
pub use sink::NotificationSink;
pub use widget::{ChoiceOption, ContainerSnapshot, DropdownOption, FieldKind, Widget};
