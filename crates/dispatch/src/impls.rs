mod transmission;

pub use transmission::TransmissionDispatcher;
