use super::Serializer;

use vdir_core::schema::Partition;

/// SQL dialect a statement is serialized for.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Flavor {
    /// Unquoted identifiers and `?` placeholders, as accepted by most
    /// client libraries.
    #[default]
    Generic,
    Postgresql,
    Sqlite,
    Mysql,
}

impl<'a> Serializer<'a> {
    pub fn new(partition: &'a Partition, flavor: Flavor) -> Serializer<'a> {
        Serializer { partition, flavor }
    }

    pub fn generic(partition: &'a Partition) -> Serializer<'a> {
        Serializer {
            partition,
            flavor: Flavor::Generic,
        }
    }

    pub fn sqlite(partition: &'a Partition) -> Serializer<'a> {
        Serializer {
            partition,
            flavor: Flavor::Sqlite,
        }
    }

    pub fn postgresql(partition: &'a Partition) -> Serializer<'a> {
        Serializer {
            partition,
            flavor: Flavor::Postgresql,
        }
    }

    pub fn mysql(partition: &'a Partition) -> Serializer<'a> {
        Serializer {
            partition,
            flavor: Flavor::Mysql,
        }
    }

    pub(super) fn is_mysql(&self) -> bool {
        self.flavor == Flavor::Mysql
    }
}
