//! Static option lists for the enumerated filters.

use crate::search_const::{FIRST_YEAR_OF_ENTRY, LAST_YEAR_OF_ENTRY};
use crate::select_option::{SelectOption, sort_options};

pub const NATURE_OF_JOB: &[&str] = &[
    "ACADEMIA",
    "BANKING",
    "CAREERBREAK",
    "CORPORATE",
    "DECEASED",
    "ENTREPRENEUR",
    "FREELANCE",
    "GLOBAL",
    "GOVERNMENT",
];

pub const PROGRAM_NAMES: &[&str] = &["BCS", "BIT", "MBA", "MTECH", "IPG", "PGDIT", "PGDMIT", "PHD", "DSC"];

pub const SPECIALIZATIONS: &[&str] = &[
    "AN", "BA", "BI", "CN", "DC", "ICS", "IFS", "IMG", "IMT", "IS", "ISM", "IT+MBA", "ITES", "MBA", "MTECH", "NFSPAM",
    "PAMF", "PIT", "PMGF", "PSM", "SE", "VLSI", "WNC",
];

/// Every catalog the front ends can list by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Catalog {
    YearOfEntry,
    ProgramName,
    Specialization,
    NatureOfJob,
}

impl Catalog {
    pub fn options(self) -> Vec<SelectOption> {
        match self {
            Catalog::YearOfEntry => year_of_entry_options(),
            Catalog::ProgramName => program_name_options(),
            Catalog::Specialization => specialization_options(),
            Catalog::NatureOfJob => nature_of_job_options(),
        }
    }
}

pub fn year_of_entry_options() -> Vec<SelectOption> {
    (FIRST_YEAR_OF_ENTRY..=LAST_YEAR_OF_ENTRY).map(|year| SelectOption::same(year.to_string())).collect()
}

pub fn program_name_options() -> Vec<SelectOption> {
    sorted_catalog(PROGRAM_NAMES)
}

pub fn specialization_options() -> Vec<SelectOption> {
    sorted_catalog(SPECIALIZATIONS)
}

pub fn nature_of_job_options() -> Vec<SelectOption> {
    sorted_catalog(NATURE_OF_JOB)
}

fn sorted_catalog(entries: &[&str]) -> Vec<SelectOption> {
    let mut options = entries.iter().map(|entry| SelectOption::same(*entry)).collect::<Vec<_>>();
    sort_options(&mut options);
    options
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn years_cover_the_whole_range_in_order() {
        let years = year_of_entry_options();
        assert_eq!(years.len(), (LAST_YEAR_OF_ENTRY - FIRST_YEAR_OF_ENTRY + 1) as usize);
        assert_eq!(years.first().map(|o| o.value.as_str()), Some("1998"));
        assert_eq!(years.last().map(|o| o.value.as_str()), Some("2026"));
    }

    #[test]
    fn programs_are_sorted_by_label() {
        let labels = program_name_options().into_iter().map(|o| o.label).collect::<Vec<_>>();
        assert_eq!(labels, vec!["BCS", "BIT", "DSC", "IPG", "MBA", "MTECH", "PGDIT", "PGDMIT", "PHD"]);
    }

    #[test]
    fn catalogs_keep_every_entry() {
        assert_eq!(Catalog::Specialization.options().len(), SPECIALIZATIONS.len());
        assert_eq!(Catalog::NatureOfJob.options().len(), NATURE_OF_JOB.len());
    }
}
