use super::layout::SequenceLayout;
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// One inter-chain contact between two residues, with 1-based chain-local numbering.
///
/// The two endpoints are interchangeable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactObservation {
    pub chain_a: char,
    pub residue_a: usize,
    pub chain_b: char,
    pub residue_b: usize,
    pub area: f64,
}

impl ContactObservation {
    pub fn endpoints(&self) -> [(char, usize); 2] {
        [
            (self.chain_a, self.residue_a),
            (self.chain_b, self.residue_b),
        ]
    }

    fn crosses(&self, group_a: &HashSet<char>, group_b: &HashSet<char>) -> bool {
        (group_a.contains(&self.chain_a) && group_b.contains(&self.chain_b))
            || (group_b.contains(&self.chain_a) && group_a.contains(&self.chain_b))
    }
}

/// Interface residues per chain and the contact area accumulated on each of them.
///
/// Built once from a batch of contacts and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InterfaceSet {
    residues: BTreeMap<char, BTreeSet<usize>>,
    areas: BTreeMap<(char, usize), f64>,
}

impl InterfaceSet {
    /// Collects every contact endpoint and sums the contact areas touching it.
    ///
    /// Repeated observations of the same residue pair are counted again, so each
    /// contributes its area once more. Whether the contact program can emit such
    /// duplicates for one geometric contact has not been confirmed.
    pub fn from_contacts<'a, I>(observations: I) -> Self
    where
        I: IntoIterator<Item = &'a ContactObservation>,
    {
        let mut set = Self::default();
        for observation in observations {
            for (chain, residue) in observation.endpoints() {
                set.residues.entry(chain).or_default().insert(residue);
                *set.areas.entry((chain, residue)).or_insert(0.0) += observation.area;
            }
        }
        set
    }

    /// Like [`InterfaceSet::from_contacts`], keeping only contacts with one endpoint
    /// in `group_a` and the other in `group_b`.
    pub fn from_contacts_between<'a, I>(
        observations: I,
        group_a: &HashSet<char>,
        group_b: &HashSet<char>,
    ) -> Self
    where
        I: IntoIterator<Item = &'a ContactObservation>,
    {
        Self::from_contacts(
            observations
                .into_iter()
                .filter(|observation| observation.crosses(group_a, group_b)),
        )
    }

    /// Treats every residue of every chain as interface with unit area.
    pub fn from_all_residues(layout: &SequenceLayout) -> Self {
        let mut set = Self::default();
        for span in layout.spans() {
            let residues: BTreeSet<usize> = (1..=span.len()).collect();
            for &residue in &residues {
                set.areas.insert((span.label, residue), 1.0);
            }
            set.residues.insert(span.label, residues);
        }
        set
    }

    pub fn residues_of(&self, chain: char) -> Option<&BTreeSet<usize>> {
        self.residues.get(&chain)
    }

    pub fn area_of(&self, chain: char, residue: usize) -> Option<f64> {
        self.areas.get(&(chain, residue)).copied()
    }

    pub fn chains(&self) -> impl Iterator<Item = char> + '_ {
        self.residues.keys().copied()
    }

    pub fn num_residues(&self) -> usize {
        self.areas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    pub fn total_area(&self) -> f64 {
        self.areas.values().sum()
    }
}
