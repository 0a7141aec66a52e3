//! Few-shot prompt construction for multiple-choice reading comprehension.
//!
//! This crate turns a CosmosQA-style dataset into prompts and integer labels:
//! - `dataset`: records, ordered choices, and the JSON loader
//! - `config`: exemplar selection and the instruction header toggle
//! - `errors`: the transform error type
//! - `labels`: sort-and-rank label encoding
//! - `prompt`: exemplar selection and prompt rendering
//! - `transform`: the prompt transformer tying it together

// Interdiction stricte de pratiques dangereuses ou non idiomatiques
#![deny(warnings)] // Tous les warnings sont traités comme des erreurs
#![deny(unsafe_code)] // Le code unsafe est interdit
#![deny(missing_docs)] // Toute fonction, struct, enum ou module public doit être documenté
#![deny(dead_code)] // Le code inutilisé est interdit
#![deny(non_camel_case_types)]
// Les types doivent suivre la convention CamelCase (exception explicite possible au besoin)

// Options supplémentaires pour ne rien laisser passer
#![deny(unused_imports)] // Les imports inutilisés sont interdits
#![deny(unused_variables)] // Les variables inutilisés sont interdits
#![deny(unused_must_use)] // Oblige à gérer explicitement les Result et Option
#![deny(non_snake_case)] // Les noms de variables et fonctions doivent être en snake_case
#![deny(non_upper_case_globals)] // Les constantes et globals doivent être en MAJUSCULE
#![deny(nonstandard_style)] // Empêche tout style de code non standard
#![forbid(unsafe_op_in_unsafe_fn)]
// Interdit l'utilisation d'unsafe même dans une fonction unsafe

// Clippy pour stricte discipline
#![deny(clippy::all)] // Active toutes les lints Clippy standard
#![deny(clippy::pedantic)] // Active les lints très strictes de Clippy
#![deny(clippy::nursery)] // Active les lints expérimentales
#![deny(clippy::unwrap_used)] // Interdit unwrap()
#![deny(clippy::expect_used)] // Interdit expect()
#![deny(clippy::panic)] // Interdit panic!()
#![deny(clippy::print_stdout)] // Interdit println!() en production
#![deny(clippy::todo)] // Interdit les TODO dans le code
#![deny(clippy::unimplemented)] // Interdit les fonctions non implémentées
#![deny(clippy::missing_const_for_fn)] // Force const lorsque possible
#![deny(clippy::unwrap_in_result)] // Interdit unwrap() sur Result
#![deny(clippy::module_inception)] // Interdit un module ayant le même nom que le crate
#![deny(clippy::redundant_clone)] // Interdit les clones inutiles
#![deny(clippy::shadow_unrelated)] // Interdit le shadowing de variables non liées
#![deny(clippy::too_many_arguments)] // Limite le nombre d’arguments des fonctions
#![deny(clippy::cognitive_complexity)] // Limite la complexité cognitive des fonctions

// Lints pour sécurité et robustesse
#![deny(overflowing_literals)] // Interdit les littéraux qui débordent

/// Configuration for exemplar selection and prompt headers.
pub mod config;
/// Dataset records and loading.
pub mod dataset;
/// Error types.
pub mod errors;
/// Label encoding.
pub mod labels;
/// Exemplar selection and prompt rendering.
pub mod prompt;
/// Entry helpers for the `cosmos-prompts` binary.
pub mod start_prompt_builder;
/// Dataset-to-prompt transformer.
pub mod transform;

pub use config::{DEFAULT_EXEMPLAR_INDICES, DEFAULT_HEADER, ExemplarSelection, TransformConfig};
pub use dataset::{Choices, Record, load_dataset, read_dataset};
pub use errors::{TransformError, TransformResult};
pub use labels::LabelEncoder;
pub use prompt::{build_prompt, render_example, select_exemplars};
pub use transform::{PromptTransformer, TransformOutput};
