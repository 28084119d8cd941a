/// Identifier the remote service assigned to an accepted job.
///
/// For BitTorrent backends `id` is the info hash. `name` is whatever
/// display name the service derived from the payload, when it reports
/// one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobHandle {
    pub id: String,
    pub name: Option<String>,
}
