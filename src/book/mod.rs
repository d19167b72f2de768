//! Book data: ordering registry and read-only record stores.
//!
//! Everything here is loaded once before a render pass and only read
//! afterwards, so a `&Book` can be shared freely between render workers.

mod order;
mod people;
mod refs;
mod table;
mod units;

pub use order::{OrderData, OrderingRegistry};
pub use people::Contributor;
pub use refs::{BibEntry, GlossaryEntry};
pub use table::KeyedTable;
pub use units::UnitMeta;

use crate::core::TargetKind;
use crate::data::DataError;
use crate::xref::{APPENDIX_CAPACITY, XrefError};

/// All data consumed by a render pass.
#[derive(Debug, Clone, Default)]
pub struct Book {
    pub order: OrderingRegistry,
    pub units: KeyedTable<UnitMeta>,
    pub contributors: KeyedTable<Contributor>,
    pub references: KeyedTable<BibEntry>,
    /// `None` when no glossary table was supplied.
    pub glossary: Option<KeyedTable<GlossaryEntry>>,
}

impl Book {
    pub fn new(order: OrderingRegistry, units: Vec<UnitMeta>) -> Result<Self, DataError> {
        Ok(Self {
            order,
            units: KeyedTable::new(units)?,
            ..Self::default()
        })
    }

    pub fn with_contributors(mut self, records: Vec<Contributor>) -> Result<Self, DataError> {
        self.contributors = KeyedTable::new(records)?;
        Ok(self)
    }

    pub fn with_references(mut self, records: Vec<BibEntry>) -> Result<Self, DataError> {
        self.references = KeyedTable::new(records)?;
        Ok(self)
    }

    pub fn with_glossary(mut self, records: Vec<GlossaryEntry>) -> Result<Self, DataError> {
        self.glossary = Some(KeyedTable::new(records)?);
        Ok(self)
    }

    /// Title of a unit, if it has a metadata record.
    pub fn title(&self, slug: &str) -> Option<&str> {
        self.units.get(slug).map(|meta| meta.title.as_str())
    }

    /// Structural problems detectable before rendering: registry slugs
    /// without metadata, and appendices beyond the lettering capacity.
    pub fn validate(&self) -> Vec<XrefError> {
        let mut problems = Vec::new();

        for (kind, slug) in self.order.units() {
            if !self.units.contains(slug) {
                problems.push(XrefError::MissingMetadata {
                    kind,
                    slug: slug.to_string(),
                });
            }
        }

        for (position, slug) in self
            .order
            .appendices()
            .iter()
            .enumerate()
            .skip(APPENDIX_CAPACITY)
        {
            problems.push(XrefError::CapacityExceeded {
                kind: TargetKind::Appendix,
                slug: slug.clone(),
                position,
            });
        }

        problems
    }
}
