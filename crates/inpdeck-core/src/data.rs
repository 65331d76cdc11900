//! Data-block cards.
//!
//! The data block holds everything that is not a cell or surface card:
//! problem type, materials, sources, tallies, physics settings, variance
//! reduction, and run control. [`DataCard`] is the tagged union over the
//! catalog; the records themselves live in the submodules by family.

pub mod material;
pub mod misc;
pub mod physics;
pub mod source;
pub mod tally;
pub mod transform;
pub mod weight;

use std::fmt;

pub use material::{Material, MaterialOption, MaterialThermal, Substance};
pub use misc::{
    Areas, DumpControl, Fillings, HistoryLimit, IntegerArray, Lattices, LostControl,
    PrintControl, RandomOption, RandomSettings, RealArray, TimeLimit, Universes, VoidOverride,
    Volumes,
};
pub use physics::{CellTemperatures, Cutoff, Mode, Physics};
pub use source::{
    CriticalitySource, DependentOption, DependentSource, DependentVariant, InformationOption,
    ProbabilityOption, ProbabilityVariant, SourceDefinition, SourceInformation,
    SourceProbability, SourceValue, SourceVariable,
};
pub use tally::{
    DetectorPoint, PrintOrder, SegmentDivisors, Tally, TallyCosines, TallyEnergies, TallyTimes,
    TallyVariant,
};
pub use transform::CoordinateTransform;
pub use weight::{CellImportances, WindowBounds, WindowEnergies, WindowParameters};

/// Any card of the data block.
#[derive(Debug, Clone, PartialEq)]
pub enum DataCard {
    Mode(Mode),
    Volumes(Volumes),
    Areas(Areas),
    Transform(CoordinateTransform),
    Universes(Universes),
    Lattices(Lattices),
    Fillings(Fillings),
    Material(Material),
    Thermal(MaterialThermal),
    Source(SourceDefinition),
    Information(SourceInformation),
    Probability(SourceProbability),
    Bias(SourceProbability),
    Dependent(DependentSource),
    Criticality(CriticalitySource),
    Tally(Tally),
    TallyEnergies(TallyEnergies),
    TallyTimes(TallyTimes),
    TallyCosines(TallyCosines),
    SegmentDivisors(SegmentDivisors),
    PrintOrder(PrintOrder),
    Physics(Physics),
    Cutoff(Cutoff),
    Temperatures(CellTemperatures),
    Importances(CellImportances),
    WindowEnergies(WindowEnergies),
    WindowBounds(WindowBounds),
    WindowParameters(WindowParameters),
    Histories(HistoryLimit),
    Time(TimeLimit),
    Random(RandomSettings),
    Dump(DumpControl),
    Print(PrintControl),
    Lost(LostControl),
    Integers(IntegerArray),
    Reals(RealArray),
    Void(VoidOverride),
}

impl fmt::Display for DataCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataCard::Mode(c) => write!(f, "{c}"),
            DataCard::Volumes(c) => write!(f, "{c}"),
            DataCard::Areas(c) => write!(f, "{c}"),
            DataCard::Transform(c) => write!(f, "{c}"),
            DataCard::Universes(c) => write!(f, "{c}"),
            DataCard::Lattices(c) => write!(f, "{c}"),
            DataCard::Fillings(c) => write!(f, "{c}"),
            DataCard::Material(c) => write!(f, "{c}"),
            DataCard::Thermal(c) => write!(f, "{c}"),
            DataCard::Source(c) => write!(f, "{c}"),
            DataCard::Information(c) => write!(f, "{c}"),
            // `sp` and `sb` share one record shape; the variant supplies
            // the mnemonic.
            DataCard::Probability(c) => c.fmt_as(f, "sp"),
            DataCard::Bias(c) => c.fmt_as(f, "sb"),
            DataCard::Dependent(c) => write!(f, "{c}"),
            DataCard::Criticality(c) => write!(f, "{c}"),
            DataCard::Tally(c) => write!(f, "{c}"),
            DataCard::TallyEnergies(c) => write!(f, "{c}"),
            DataCard::TallyTimes(c) => write!(f, "{c}"),
            DataCard::TallyCosines(c) => write!(f, "{c}"),
            DataCard::SegmentDivisors(c) => write!(f, "{c}"),
            DataCard::PrintOrder(c) => write!(f, "{c}"),
            DataCard::Physics(c) => write!(f, "{c}"),
            DataCard::Cutoff(c) => write!(f, "{c}"),
            DataCard::Temperatures(c) => write!(f, "{c}"),
            DataCard::Importances(c) => write!(f, "{c}"),
            DataCard::WindowEnergies(c) => write!(f, "{c}"),
            DataCard::WindowBounds(c) => write!(f, "{c}"),
            DataCard::WindowParameters(c) => write!(f, "{c}"),
            DataCard::Histories(c) => write!(f, "{c}"),
            DataCard::Time(c) => write!(f, "{c}"),
            DataCard::Random(c) => write!(f, "{c}"),
            DataCard::Dump(c) => write!(f, "{c}"),
            DataCard::Print(c) => write!(f, "{c}"),
            DataCard::Lost(c) => write!(f, "{c}"),
            DataCard::Integers(c) => write!(f, "{c}"),
            DataCard::Reals(c) => write!(f, "{c}"),
            DataCard::Void(c) => write!(f, "{c}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Particle;

    #[test]
    fn test_display_dispatch() {
        let mode = DataCard::Mode(Mode::new(vec![Particle::NEUTRON]).unwrap());
        assert_eq!(mode.to_string(), "mode n");

        let nps = DataCard::Histories(HistoryLimit::new(1000, None).unwrap());
        assert_eq!(nps.to_string(), "nps 1000");
    }

    #[test]
    fn test_probability_and_bias_mnemonics() {
        let record = SourceProbability::new(
            1,
            ProbabilityVariant::Values {
                option: None,
                probabilities: vec![0.5, 0.5],
            },
        )
        .unwrap();
        assert_eq!(DataCard::Probability(record.clone()).to_string(), "sp1 0.5 0.5");
        assert_eq!(DataCard::Bias(record).to_string(), "sb1 0.5 0.5");
    }
}
