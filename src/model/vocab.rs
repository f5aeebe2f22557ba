//! Well-known vocabulary IRIs used by the change engine.

pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

pub const SKOS_CONCEPT: &str = "http://www.w3.org/2004/02/skos/core#Concept";
pub const SKOS_PREF_LABEL: &str = "http://www.w3.org/2004/02/skos/core#prefLabel";

pub const DCTERMS_TITLE: &str = "http://purl.org/dc/terms/title";
pub const DC_TITLE: &str = "http://purl.org/dc/elements/1.1/title";

pub const OWL_ONTOLOGY: &str = "http://www.w3.org/2002/07/owl#Ontology";
pub const OWL_RESTRICTION: &str = "http://www.w3.org/2002/07/owl#Restriction";
pub const OWL_ON_PROPERTY: &str = "http://www.w3.org/2002/07/owl#onProperty";
pub const OWL_ON_CLASS: &str = "http://www.w3.org/2002/07/owl#onClass";
pub const OWL_MIN_QUALIFIED_CARDINALITY: &str =
    "http://www.w3.org/2002/07/owl#minQualifiedCardinality";
pub const OWL_MAX_QUALIFIED_CARDINALITY: &str =
    "http://www.w3.org/2002/07/owl#maxQualifiedCardinality";
pub const OWL_MIN_CARDINALITY: &str = "http://www.w3.org/2002/07/owl#minCardinality";
pub const OWL_MAX_CARDINALITY: &str = "http://www.w3.org/2002/07/owl#maxCardinality";

pub const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
pub const XSD_NON_NEGATIVE_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#nonNegativeInteger";

/// Relation property marking the first ("start") related element.
pub const MA_VZTAZENY_PRVEK_1: &str =
    "https://slovník.gov.cz/základní/pojem/má-vztažený-prvek-1";
/// Relation property marking the second ("end") related element.
pub const MA_VZTAZENY_PRVEK_2: &str =
    "https://slovník.gov.cz/základní/pojem/má-vztažený-prvek-2";

/// Default label predicates, in order of preference.
///
/// `dcterms:title` is not among them; configurations that label with it list
/// it explicitly in `diff.label_predicates`.
pub const DEFAULT_LABEL_PREDICATES: &[&str] = &[SKOS_PREF_LABEL, DC_TITLE];

/// Whether `predicate` carries a minimum cardinality.
#[must_use]
pub fn is_min_cardinality(predicate: &str) -> bool {
    predicate == OWL_MIN_QUALIFIED_CARDINALITY || predicate == OWL_MIN_CARDINALITY
}

/// Whether `predicate` carries a maximum cardinality.
#[must_use]
pub fn is_max_cardinality(predicate: &str) -> bool {
    predicate == OWL_MAX_QUALIFIED_CARDINALITY || predicate == OWL_MAX_CARDINALITY
}
