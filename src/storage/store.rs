//! The registry store: sole gateway to persisted state.
//!
//! One store owns one [`rusqlite::Connection`] for its whole lifetime.
//! Every operation is synchronous and touches at most one logical insert or
//! update, so no multi-statement transactions are needed.

use std::collections::HashMap;
use std::path::Path;

use rusqlite::Connection;

use crate::error::{classify_insert_error, StoreError};
use crate::model::{Agency, Agent, Property};
use crate::storage::schema::{apply_pragmas, initialize_schema};

/// Typed store over the agencies/agents/properties tables.
///
/// Bound to one database at construction. Lookups that match nothing return
/// empty collections; updates that match nothing are no-ops. The only
/// operation failures of the store's own are [`StoreError::DuplicateKey`]
/// and [`StoreError::ReferentialIntegrity`] on inserts.
pub struct RegistryStore {
    conn: Connection,
}

impl RegistryStore {
    /// Open the registry at `path`, creating the database and schema on
    /// first use.
    ///
    /// Reopening an existing registry is safe: schema creation is
    /// idempotent.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path.as_ref())?;
        let store = Self::from_connection(conn)?;
        tracing::info!(path = %path.as_ref().display(), "Registry opened");
        Ok(store)
    }

    /// Open an in-memory registry. The database vanishes on close.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        apply_pragmas(&conn)?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Insert a new agency.
    ///
    /// Fails with [`StoreError::DuplicateKey`] if the id is already taken.
    pub fn add_agency(&self, agency: &Agency) -> Result<(), StoreError> {
        self.conn
            .execute(
                "INSERT INTO agencies (id, name, address) VALUES (?1, ?2, ?3)",
                rusqlite::params![agency.id, agency.name, agency.address],
            )
            .map_err(|e| classify_insert_error(e, "agency", "agency", agency.id))?;

        tracing::debug!(agency_id = agency.id, "Agency inserted");
        Ok(())
    }

    /// Insert a new agent.
    ///
    /// Fails with [`StoreError::DuplicateKey`] if the id is already taken,
    /// or [`StoreError::ReferentialIntegrity`] if `agency_id` does not
    /// reference an existing agency.
    pub fn add_agent(&self, agent: &Agent) -> Result<(), StoreError> {
        self.conn
            .execute(
                "INSERT INTO agents (id, name, email, agency_id) VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![agent.id, agent.name, agent.email, agent.agency_id],
            )
            .map_err(|e| classify_insert_error(e, "agent", "agency", agent.id))?;

        tracing::debug!(agent_id = agent.id, agency_id = agent.agency_id, "Agent inserted");
        Ok(())
    }

    /// Insert a new property listing.
    ///
    /// Fails with [`StoreError::DuplicateKey`] if the id is already taken,
    /// or [`StoreError::ReferentialIntegrity`] if `agent_id` does not
    /// reference an existing agent.
    pub fn add_property(&self, property: &Property) -> Result<(), StoreError> {
        self.conn
            .execute(
                "INSERT INTO properties (id, address, price, status, agent_id)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                rusqlite::params![
                    property.id,
                    property.address,
                    property.price,
                    property.status,
                    property.agent_id,
                ],
            )
            .map_err(|e| classify_insert_error(e, "property", "agent", property.id))?;

        tracing::debug!(
            property_id = property.id,
            agent_id = property.agent_id,
            "Property inserted"
        );
        Ok(())
    }

    /// All properties managed by the given agent. Empty when the agent has
    /// none or does not exist. Order unspecified.
    pub fn properties_by_agent(&self, agent_id: i64) -> Result<Vec<Property>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, address, price, status, agent_id
             FROM properties WHERE agent_id = ?1",
        )?;
        let rows = stmt
            .query_map([agent_id], property_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// All agents working for the given agency. Empty when the agency has
    /// none or does not exist. Order unspecified.
    pub fn agents_by_agency(&self, agency_id: i64) -> Result<Vec<Agent>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, email, agency_id
             FROM agents WHERE agency_id = ?1",
        )?;
        let rows = stmt
            .query_map([agency_id], agent_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// All properties managed by any agent of the given agency: the two-hop
    /// lookup property -> agent -> agency. Empty when nothing matches.
    pub fn properties_by_agency(&self, agency_id: i64) -> Result<Vec<Property>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT p.id, p.address, p.price, p.status, p.agent_id
             FROM properties p
             JOIN agents a ON a.id = p.agent_id
             JOIN agencies ag ON ag.id = a.agency_id
             WHERE ag.id = ?1",
        )?;
        let rows = stmt
            .query_map([agency_id], property_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Set the status label of a property.
    ///
    /// Silently does nothing when no property has that id; no row is
    /// created and no error is raised.
    pub fn update_property_status(
        &self,
        property_id: i64,
        new_status: &str,
    ) -> Result<(), StoreError> {
        let updated = self.conn.execute(
            "UPDATE properties SET status = ?2 WHERE id = ?1",
            rusqlite::params![property_id, new_status],
        )?;

        if updated > 0 {
            tracing::debug!(property_id, status = new_status, "Property status updated");
        }
        Ok(())
    }

    /// For every agency with at least one agent, the agent holding the most
    /// property listings, keyed by agency id.
    ///
    /// Agencies without agents are absent from the map. An agent with zero
    /// listings still wins when every sibling has zero (count 0 is a valid
    /// maximum). Ties resolve to an arbitrary holder of the true maximum.
    pub fn best_agent_per_agency(&self) -> Result<HashMap<i64, Agent>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT a.id, a.name, a.email, a.agency_id, COUNT(p.id) AS listings
             FROM agents a
             LEFT JOIN properties p ON p.agent_id = a.id
             GROUP BY a.id",
        )?;
        let counted = stmt
            .query_map([], |row| {
                Ok((agent_from_row(row)?, row.get::<_, i64>(4)?))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        // One pass: keep the first agent seen at a strictly greater count.
        let mut best: HashMap<i64, (Agent, i64)> = HashMap::new();
        for (agent, listings) in counted {
            match best.get(&agent.agency_id) {
                Some((_, current)) if *current >= listings => {}
                _ => {
                    best.insert(agent.agency_id, (agent, listings));
                }
            }
        }

        Ok(best
            .into_iter()
            .map(|(agency_id, (agent, _))| (agency_id, agent))
            .collect())
    }

    /// Close the underlying connection, consuming the store.
    pub fn close(self) -> Result<(), StoreError> {
        self.conn.close().map_err(|(_, err)| StoreError::from(err))?;
        tracing::info!("Registry closed");
        Ok(())
    }
}

fn agent_from_row(row: &rusqlite::Row<'_>) -> Result<Agent, rusqlite::Error> {
    Ok(Agent {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        agency_id: row.get(3)?,
    })
}

fn property_from_row(row: &rusqlite::Row<'_>) -> Result<Property, rusqlite::Error> {
    Ok(Property {
        id: row.get(0)?,
        address: row.get(1)?,
        price: row.get(2)?,
        status: row.get(3)?,
        agent_id: row.get(4)?,
    })
}
