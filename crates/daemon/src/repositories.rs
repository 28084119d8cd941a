mod dispatched;

pub use dispatched::DispatchedJobRepository;
