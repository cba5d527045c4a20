/// DynamoDB table configuration.
///
/// Describes one of the collections the router reads and writes: the table
/// name plus the attribute names that make up its primary key.
///
/// # Primary Key
///
/// - **Partition Key**: `username` for users, `daycareID` for daycares, `bookingID` for bookings.
/// - **Sort Key**: only bookings carry one (`endTime`), which is what makes
///   the "active bookings" range query possible.
///
/// Both key attributes are stored as strings.
///
/// # Example
///
/// ```
/// let table = Table::new("Bookings", "bookingID", Some("endTime"));
/// assert_eq!(table.sort_key(), Some("endTime"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    name: String,
    partition_key: String,
    sort_key: Option<String>,
}

impl Table {
    /// Creates a new `Table` instance.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the DynamoDB table.
    /// * `partition_key` - The name of the partition key attribute.
    /// * `sort_key` - The name of the sort key attribute, if any.
    pub fn new(
        name: impl Into<String>,
        partition_key: impl Into<String>,
        sort_key: Option<&str>,
    ) -> Self {
        Self {
            name: name.into(),
            partition_key: partition_key.into(),
            sort_key: sort_key.map(str::to_string),
        }
    }

    /// Returns the name of the table.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the partition key of the table.
    pub fn partition_key(&self) -> &str {
        &self.partition_key
    }

    /// Returns the sort key of the table, if any.
    pub fn sort_key(&self) -> Option<&str> {
        self.sort_key.as_deref()
    }
}
