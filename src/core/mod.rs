//! Business logic over the entity store. Services are stateless; every
//! operation takes the store explicitly and runs to completion as one
//! synchronous step.

pub mod services;
