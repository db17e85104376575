pub(crate) mod synchsafe;
pub mod upgrade;
