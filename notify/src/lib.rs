//! Outbound form delivery through hosted relays.

pub mod booking;
pub mod contact;
pub mod email;
pub mod form;
pub mod guard;
pub mod sender;

pub use booking::{BookingDesk, BookingRequest};
pub use contact::{ContactDesk, ContactMessage, ContactSubject};
pub use email::{EmailRelay, EmailRelayConfig};
pub use form::FormRelay;
pub use guard::SubmissionGuard;
pub use sender::{Delivery, Notification, NotificationKind, NotificationSender, NotifyError};
