mod contact;
mod subscribe;

pub use contact::ContactNotifier;
pub use subscribe::SubscribeNotifier;
