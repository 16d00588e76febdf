//! Application layer containing the core business logic orchestration.
//!
//! This module defines the `CheckoutWorkflow`, the single composing component
//! of the service. It owns its collaborator ports (payment gateway,
//! notification sender, checkout store) and sequences one payment attempt
//! from validation through side effects.

pub mod checkout;
