//! Closed enumerations used by models and API operations

use crate::wire_enum;

wire_enum! {
    /// Kinds of access that can be granted on a securable object
    pub enum PermissionType {
        Read => "READ",
        Write => "WRITE",
        Owner => "OWNER",
        Link => "LINK",
        Discover => "DISCOVER",
    }
}

wire_enum! {
    pub enum PrincipalType {
        User => "USER",
        Role => "ROLE",
        Organization => "ORGANIZATION",
    }
}

wire_enum! {
    /// Mutation applied by an ACL update
    pub enum ActionType {
        Add => "ADD",
        Remove => "REMOVE",
        Set => "SET",
    }
}

wire_enum! {
    pub enum SecurableType {
        AssociationType => "AssociationType",
        EntitySet => "EntitySet",
        EntityType => "EntityType",
        Organization => "Organization",
        PropertyTypeInEntitySet => "PropertyTypeInEntitySet",
        Role => "Role",
    }
}

wire_enum! {
    /// Lifecycle of a permission request
    pub enum RequestStateType {
        Submitted => "SUBMITTED",
        Approved => "APPROVED",
        Declined => "DECLINED",
    }
}

wire_enum! {
    /// Search analyzer applied to a property type
    pub enum AnalyzerType {
        Standard => "STANDARD",
        Metaphone => "METAPHONE",
        NotAnalyzed => "NOT_ANALYZED",
    }
}

wire_enum! {
    pub enum IndexType {
        Btree => "BTREE",
        Gin => "GIN",
        Gist => "GIST",
        Hash => "HASH",
        None => "NONE",
    }
}

wire_enum! {
    /// Soft deletes keep the entity recoverable, hard deletes do not
    pub enum DeleteType {
        Soft => "Soft",
        Hard => "Hard",
    }
}

wire_enum! {
    /// How replacement entity data is merged with what is stored
    pub enum UpdateType {
        Replace => "Replace",
        PartialReplace => "PartialReplace",
    }
}

wire_enum! {
    /// Download format for entity set data
    pub enum FileType {
        Csv => "csv",
        Json => "json",
    }
}

impl FileType {
    /// Lenient lookup used for download URLs: accepts lower or upper case only
    pub fn lookup(value: &str) -> Option<FileType> {
        match value {
            "csv" | "CSV" => Some(FileType::Csv),
            "json" | "JSON" => Some(FileType::Json),
            _ => None,
        }
    }
}
