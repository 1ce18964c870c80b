//! K-means segmentation template

use crate::table::settings_sheet;
use turas_template_core::{InstructionSection, InstructionsSpec, TemplateSpec};

pub fn template() -> TemplateSpec {
    TemplateSpec::new("segment")
        .instructions(instructions())
        .sheet(settings_sheet(
            "Config",
            "Parameter",
            [28.0, 30.0, 18.0, 35.0, 60.0],
            &[
                // Data source
                ["data_file", "data/survey.xlsx", "Required", "CSV or XLSX path", "Path to survey data file"],
                ["data_sheet", "Data", "Required", "Sheet name", "Sheet name in Excel (or leave as \"Data\" for CSV)"],
                ["id_variable", "respondent_id", "Required", "Column name", "Unique identifier column for respondents"],
                // Variables
                ["clustering_vars", "Q1,Q2,Q3,Q4,Q5,Q6", "Required", "Comma-separated codes", "Variables to use for clustering (5-15 recommended)"],
                ["profile_vars", "Gender,Age,Region", "Optional", "Comma-separated codes or blank", "Variables for profiling (leave blank to use all non-clustering vars)"],
                // Model
                ["method", "kmeans", "Required", "kmeans", "Clustering method (currently only kmeans supported)"],
                ["k_fixed", "", "Optional", "Integer 2-10 or blank", "Fixed k for final run (blank = exploration mode)"],
                ["k_min", "3", "For exploration", "2-10", "Minimum k to test (exploration mode)"],
                ["k_max", "6", "For exploration", "2-15", "Maximum k to test (exploration mode)"],
                ["nstart", "50", "Required", "1-200", "Number of random starts (50-100 recommended for stability)"],
                ["seed", "123", "Required", "Any integer", "Random seed for reproducibility"],
                // Data handling
                ["missing_data", "listwise_deletion", "Required", "listwise_deletion/mean_imputation/median_imputation/refuse", "How to handle missing values"],
                ["missing_threshold", "15", "Optional", "0-100", "Maximum % missing per variable (variables exceeding this are excluded)"],
                ["standardize", "TRUE", "Required", "TRUE/FALSE", "Standardize variables to mean=0, sd=1 (usually TRUE)"],
                ["min_segment_size_pct", "10", "Optional", "0-50", "Minimum segment size as % of sample (segments smaller flagged as warning)"],
                // Outliers
                ["outlier_detection", "FALSE", "Optional", "TRUE/FALSE", "Enable outlier detection (identifies unusual respondents)"],
                ["outlier_method", "zscore", "If outlier_detection=TRUE", "zscore/mahalanobis", "Outlier detection method: zscore (simple), mahalanobis (multivariate)"],
                ["outlier_threshold", "3.0", "If outlier_detection=TRUE", "1.0-5.0", "Threshold: zscore (usually 3.0), mahalanobis (chi-square based)"],
                ["outlier_min_vars", "1", "If outlier_detection=TRUE", "1-nclustering_vars", "Min variables flagged for outlier status"],
                ["outlier_handling", "flag", "If outlier_detection=TRUE", "none/flag/remove", "How to handle outliers: none (ignore), flag (mark), remove (exclude)"],
                ["outlier_alpha", "0.001", "For mahalanobis", "0.0001-0.1", "Significance level for mahalanobis test (0.001 = 99.9% confidence)"],
                // Variable selection
                ["variable_selection", "FALSE", "Optional", "TRUE/FALSE", "Enable automatic variable selection (reduces to max_clustering_vars)"],
                ["variable_selection_method", "variance_correlation", "If variable_selection=TRUE", "variance_correlation/factor_analysis/both", "Selection method"],
                ["max_clustering_vars", "10", "If variable_selection=TRUE", "2-20", "Target number of clustering variables after selection"],
                ["varsel_min_variance", "0.1", "If variable_selection=TRUE", "0.01-1.0", "Minimum variance to retain variable"],
                ["varsel_max_correlation", "0.8", "If variable_selection=TRUE", "0.5-0.95", "Maximum correlation before removing redundant variable"],
                // Validation
                ["k_selection_metrics", "silhouette,elbow", "For exploration", "silhouette/elbow/gap (comma-separated)", "Metrics for k selection: silhouette (cluster cohesion), elbow (within-SS), gap (statistical)"],
                // Output
                ["output_folder", "output/", "Required", "Directory path", "Output directory (created if not exists)"],
                ["output_prefix", "seg_", "Optional", "Any text", "Prefix for output filenames"],
                ["create_dated_folder", "TRUE", "Optional", "TRUE/FALSE", "Create subfolder with YYYYMMDD date stamp"],
                ["segment_names", "auto", "Optional", "auto or comma-separated names", "Segment names (auto = \"Segment 1\", \"Segment 2\", etc.)"],
                ["save_model", "TRUE", "Optional", "TRUE/FALSE", "Save model object (.rds) for scoring new data"],
                // Metadata
                ["project_name", "Customer Segmentation", "Optional", "Any text", "Project name (for documentation)"],
                ["analyst_name", "Analyst Name", "Optional", "Any text", "Analyst name (for documentation)"],
                ["description", "B2C customer segmentation analysis", "Optional", "Any text", "Project description"],
                ["question_labels_file", "question_labels.xlsx", "Optional", "XLSX path or blank", "File with variable labels (2 columns: variable, label)"],
            ],
        ))
}

fn instructions() -> InstructionsSpec {
    InstructionsSpec::new(
        "Segmentation Analysis Configuration Template",
        "This template configures k-means clustering segmentation analysis. It supports two \
         modes: Exploration (test multiple k values) and Final (run with fixed k). Configure \
         clustering variables, data handling, outlier detection, and output preferences.",
    )
    .section(InstructionSection::new(
        "Analysis Modes",
        [
            "Exploration Mode: Set k_fixed to blank. System tests k_min to k_max and recommends best k",
            "Final Run Mode: Set k_fixed to specific number (e.g., 4). System creates final segments",
            "Recommendation: Start with exploration, review metrics, then run final with chosen k",
        ],
    ))
    .section(InstructionSection::new(
        "Key Configuration Decisions",
        [
            "clustering_vars: Choose 5-15 discriminating variables (too few = poor separation, too many = noise)",
            "standardize: Usually TRUE (scales variables to same range)",
            "missing_data: listwise_deletion (default), mean_imputation, or median_imputation",
            "outlier_detection: Enable to identify unusual respondents (zscore or mahalanobis methods)",
            "k_min/k_max: Typically 3-6 for consumer segmentation, 2-4 for B2B",
        ],
    ))
    .section(InstructionSection::new(
        "Output Files",
        [
            "Creates dated folder (YYYYMMDD) in output directory",
            "segment_assignments.csv: Respondent-level segment membership",
            "segment_profiles.xlsx: Detailed segment characteristics",
            "segment_validation.xlsx: Quality metrics (silhouette, elbow, gap)",
            "segment_model.rds: Saved model (for scoring new data)",
        ],
    ))
}
