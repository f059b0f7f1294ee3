/// Obfuscated names as shipped. Source namespace of the official mappings and of the merged
/// output.
pub const OFFICIAL: &str = "official";

/// Stable join key between otherwise unrelated naming schemes.
pub const INTERMEDIARY: &str = "intermediary";

/// Human readable names; holds the authoritative names in the official tree and the community
/// names in the community tree.
pub const NAMED: &str = "named";

/// Column of a mapping tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamespaceId {
    Source,
    Destination(usize),
}
