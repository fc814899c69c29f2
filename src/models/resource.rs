use std::fmt;

/// The item-catalog resources exposed by the service. Both share the same
/// record shape and operations; they differ only in storage table, route
/// prefix and the wording of error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Collection,
    Collective,
}

impl Resource {
    pub const ALL: [Resource; 2] = [Resource::Collection, Resource::Collective];

    /// Storage table / document collection name
    pub fn table_name(&self) -> &'static str {
        match self {
            Resource::Collection => "collections",
            Resource::Collective => "collectives",
        }
    }

    /// Route prefix, e.g. `/collectives`
    pub fn base_path(&self) -> &'static str {
        match self {
            Resource::Collection => "/collections",
            Resource::Collective => "/collectives",
        }
    }

    /// Capitalized singular used in error titles
    pub fn title(&self) -> &'static str {
        match self {
            Resource::Collection => "Collection",
            Resource::Collective => "Collective",
        }
    }

    /// Lowercase singular used in error details
    pub fn noun(&self) -> &'static str {
        match self {
            Resource::Collection => "collection",
            Resource::Collective => "collective",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}
