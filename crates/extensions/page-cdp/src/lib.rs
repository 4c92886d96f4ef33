//! # AutoApply Page (CDP)
//!
//! Drives the form document of an already-open browser tab over the Chrome
//! DevTools Protocol. Elements are addressed through a data attribute that
//! the page scripts stamp on first sight, so handles survive re-renders as
//! long as the node itself does.

pub mod cdp;
mod form_page;
mod scripts;

pub use cdp::CdpError;
pub use form_page::CdpFormPage;
