//! # turas-template-catalog
//!
//! Annotated configuration templates for the TURAS analysis modules, plus
//! the plain working templates they annotate (see [`working`]).
//!
//! Every template is plain data: a [`TemplateSpec`] built from literal
//! tables. Rendering lives in `turas-template-render`.
//!
//! ## Example
//!
//! ```rust
//! use turas_template_catalog::Module;
//!
//! let module: Module = "pricing".parse().unwrap();
//! let template = module.template();
//! assert_eq!(module.file_name(), "Pricing_Config_Template_Annotated.xlsx");
//! assert!(template.validate().is_ok());
//! ```

mod table;

pub mod confidence;
pub mod conjoint;
pub mod conjoint_example;
pub mod crosstab;
pub mod keydriver;
pub mod parser;
pub mod pricing;
pub mod segment;
pub mod survey_structure;
pub mod tracker;
pub mod tracker_question_mapping;
pub mod working;

use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use turas_template_core::TemplateSpec;

/// A module with a template in the catalog
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Module {
    Pricing,
    KeyDriver,
    Conjoint,
    ConjointExample,
    Parser,
    SurveyStructure,
    Crosstab,
    Confidence,
    Segment,
    Tracker,
    TrackerQuestionMapping,
}

impl Module {
    /// Every module, in generation order
    pub const ALL: [Module; 11] = [
        Module::Pricing,
        Module::KeyDriver,
        Module::Conjoint,
        Module::ConjointExample,
        Module::Parser,
        Module::SurveyStructure,
        Module::Crosstab,
        Module::Confidence,
        Module::Segment,
        Module::Tracker,
        Module::TrackerQuestionMapping,
    ];

    /// Command-line name
    pub fn name(self) -> &'static str {
        match self {
            Module::Pricing => "pricing",
            Module::KeyDriver => "keydriver",
            Module::Conjoint => "conjoint",
            Module::ConjointExample => "conjoint-example",
            Module::Parser => "parser",
            Module::SurveyStructure => "survey-structure",
            Module::Crosstab => "crosstab",
            Module::Confidence => "confidence",
            Module::Segment => "segment",
            Module::Tracker => "tracker",
            Module::TrackerQuestionMapping => "tracker-question-mapping",
        }
    }

    /// Output file name
    pub fn file_name(self) -> &'static str {
        match self {
            Module::Pricing => "Pricing_Config_Template_Annotated.xlsx",
            Module::KeyDriver => "KeyDriver_Config_Template_Annotated.xlsx",
            Module::Conjoint => "Conjoint_Config_Template_Annotated.xlsx",
            Module::ConjointExample => "Conjoint_Example_Config.xlsx",
            Module::Parser => "Parser_Questionnaire_Template.xlsx",
            Module::SurveyStructure => "Survey_Structure_Template_Annotated.xlsx",
            Module::Crosstab => "Crosstab_Config_Template_Annotated.xlsx",
            Module::Confidence => "Confidence_Config_Template_Annotated.xlsx",
            Module::Segment => "Segment_Config_Template_Annotated.xlsx",
            Module::Tracker => "Tracker_Config_Template_Annotated.xlsx",
            Module::TrackerQuestionMapping => {
                "Tracker_Question_Mapping_Template_Annotated.xlsx"
            }
        }
    }

    /// One-line summary for listings
    pub fn summary(self) -> &'static str {
        match self {
            Module::Pricing => "Van Westendorp and Gabor-Granger pricing research",
            Module::KeyDriver => "Key driver (relative importance) analysis",
            Module::Conjoint => "Choice-based conjoint part-worth estimation",
            Module::ConjointExample => "Worked smartphone CBC example configuration",
            Module::Parser => "Questionnaire input for the survey structure parser",
            Module::SurveyStructure => "Questions, options and composite metrics",
            Module::Crosstab => "Single-wave cross-tabulation",
            Module::Confidence => "Confidence and credible intervals",
            Module::Segment => "K-means segmentation",
            Module::Tracker => "Multi-wave tracking",
            Module::TrackerQuestionMapping => "Question code mapping across waves",
        }
    }

    /// Build the template
    pub fn template(self) -> TemplateSpec {
        match self {
            Module::Pricing => pricing::template(),
            Module::KeyDriver => keydriver::template(),
            Module::Conjoint => conjoint::template(),
            Module::ConjointExample => conjoint_example::template(),
            Module::Parser => parser::template(),
            Module::SurveyStructure => survey_structure::template(),
            Module::Crosstab => crosstab::template(),
            Module::Confidence => confidence::template(),
            Module::Segment => segment::template(),
            Module::Tracker => tracker::template(),
            Module::TrackerQuestionMapping => tracker_question_mapping::template(),
        }
    }

    /// File name of the plain working template, if the module has one
    pub fn working_file_name(self) -> Option<&'static str> {
        working::file_name(self)
    }

    /// Plain working template, if the module has one
    pub fn working_template(self) -> Option<TemplateSpec> {
        working::template(self)
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A module name that is not in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown module '{name}' (available: {})", available())]
pub struct UnknownModule {
    pub name: String,
}

fn available() -> String {
    Module::ALL
        .iter()
        .map(|m| m.name())
        .collect::<Vec<_>>()
        .join(", ")
}

impl FromStr for Module {
    type Err = UnknownModule;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Module::ALL
            .into_iter()
            .find(|m| m.name() == wanted)
            .ok_or_else(|| UnknownModule {
                name: s.to_string(),
            })
    }
}

/// Every template in the catalog, in generation order
pub fn catalog() -> Vec<(Module, TemplateSpec)> {
    Module::ALL.into_iter().map(|m| (m, m.template())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    #[test]
    fn names_round_trip_through_from_str() {
        for module in Module::ALL {
            assert_eq!(module.name().parse::<Module>(), Ok(module));
        }
    }

    #[test]
    fn from_str_is_forgiving_about_case_and_underscores() {
        assert_eq!("KeyDriver".parse::<Module>(), Ok(Module::KeyDriver));
        assert_eq!(
            "tracker_question_mapping".parse::<Module>(),
            Ok(Module::TrackerQuestionMapping)
        );
        assert_eq!(" Segment ".parse::<Module>(), Ok(Module::Segment));
    }

    #[test]
    fn unknown_module_lists_alternatives() {
        let err = "maxdiff".parse::<Module>().unwrap_err();
        assert_eq!(err.name, "maxdiff");
        assert!(err.to_string().contains("pricing, keydriver"));
    }

    #[test]
    fn file_names_are_unique() {
        let names: HashSet<_> = Module::ALL.iter().map(|m| m.file_name()).collect();
        assert_eq!(names.len(), Module::ALL.len());
    }

    #[test]
    fn template_module_matches_name() {
        for (module, template) in catalog() {
            assert_eq!(template.module, module.name());
        }
    }
}
