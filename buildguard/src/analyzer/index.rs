//! Derived lookups over the catalog, computed on demand.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::build::Category;
use crate::catalog::{CatalogStore, Motherboard};

pub struct CompatibilityIndex<'a> {
    catalog: &'a CatalogStore,
}

/// Summary of what the catalog offers, for populating selectors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogStats {
    pub counts: BTreeMap<Category, usize>,
    pub architectures: Vec<String>,
    pub sockets_by_architecture: BTreeMap<String, Vec<String>>,
    pub motherboard_form_factors: Vec<String>,
    pub ram_generations: Vec<String>,
    pub psu_form_factors: Vec<String>,
}

impl<'a> CompatibilityIndex<'a> {
    pub fn new(catalog: &'a CatalogStore) -> Self {
        Self { catalog }
    }

    /// Distinct CPU producers, sorted.
    pub fn available_architectures(&self) -> Vec<String> {
        sorted(self.catalog.cpus().iter().filter_map(|c| c.part.producer.as_deref()))
    }

    /// Distinct sockets among CPUs from `producer`, sorted.
    pub fn sockets_for_architecture(&self, producer: &str) -> Vec<String> {
        sorted(
            self.catalog
                .cpus()
                .iter()
                .filter(|c| c.part.producer.as_deref() == Some(producer))
                .filter_map(|c| c.socket()),
        )
    }

    /// Distinct motherboard form factors, optionally for one socket.
    pub fn motherboard_form_factors(&self, socket: Option<&str>) -> Vec<String> {
        sorted(
            self.catalog
                .motherboards()
                .iter()
                .filter(|mb| socket.map_or(true, |s| mb.socket() == Some(s)))
                .filter_map(|mb| mb.form_factor()),
        )
    }

    /// Memory generations supported by the motherboards that match `socket`
    /// and `form_factor`. `None` leaves that axis unfiltered.
    pub fn supported_ram_generations(
        &self,
        socket: Option<&str>,
        form_factor: Option<&str>,
    ) -> BTreeSet<String> {
        self.matching_motherboards(socket, form_factor)
            .filter_map(|mb| mb.memory_type())
            .map(str::to_string)
            .collect()
    }

    /// Motherboards with exactly this socket and form factor, where given.
    pub fn matching_motherboards<'s>(
        &'s self,
        socket: Option<&'s str>,
        form_factor: Option<&'s str>,
    ) -> impl Iterator<Item = &'a Motherboard> + 's {
        self.catalog.motherboards().iter().filter(move |mb| {
            socket.map_or(true, |s| mb.socket() == Some(s))
                && form_factor.map_or(true, |f| mb.form_factor() == Some(f))
        })
    }

    /// Distinct RAM generations present in the RAM catalog.
    pub fn ram_generations(&self) -> Vec<String> {
        sorted(self.catalog.rams().iter().filter_map(|r| r.generation()))
    }

    pub fn psu_form_factors(&self) -> Vec<String> {
        sorted(self.catalog.psus().iter().filter_map(|p| p.form_factor()))
    }

    pub fn stats(&self) -> CatalogStats {
        let architectures = self.available_architectures();
        let sockets_by_architecture = architectures
            .iter()
            .map(|arch| (arch.clone(), self.sockets_for_architecture(arch)))
            .collect();

        CatalogStats {
            counts: Category::ALL
                .iter()
                .map(|c| (*c, self.catalog.count(*c)))
                .collect(),
            architectures,
            sockets_by_architecture,
            motherboard_form_factors: self.motherboard_form_factors(None),
            ram_generations: self.ram_generations(),
            psu_form_factors: self.psu_form_factors(),
        }
    }
}

fn sorted<'s>(values: impl Iterator<Item = &'s str>) -> Vec<String> {
    values
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
