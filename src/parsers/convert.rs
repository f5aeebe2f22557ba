//! Conversion of `oxrdf` triples into the graph model.

use crate::error::{Result, VocabDiffError};
use crate::model::{vocab, AnonId, Graph, Iri, Literal, NodeRef, Triple, Value};
use std::collections::HashMap;

/// Builds one [`Graph`], mapping blank-node labels of the source document to
/// fresh graph-local ids.
#[derive(Debug, Default)]
pub(crate) struct GraphBuilder {
    graph: Graph,
    blank_ids: HashMap<String, AnonId>,
}

impl GraphBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, triple: oxrdf::Triple) -> Result<()> {
        let subject = self.subject(triple.subject)?;
        let object = self.object(triple.object)?;
        self.graph.insert(Triple {
            subject,
            predicate: Iri::new(triple.predicate.into_string()),
            object,
        });
        Ok(())
    }

    pub(crate) fn finish(self) -> Graph {
        self.graph
    }

    fn anon(&mut self, node: &oxrdf::BlankNode) -> AnonId {
        if let Some(id) = self.blank_ids.get(node.as_str()) {
            return *id;
        }
        let id = self.graph.fresh_anon();
        self.blank_ids.insert(node.as_str().to_string(), id);
        id
    }

    fn subject(&mut self, subject: oxrdf::Subject) -> Result<NodeRef> {
        match subject {
            oxrdf::Subject::NamedNode(node) => Ok(NodeRef::Named(Iri::new(node.into_string()))),
            oxrdf::Subject::BlankNode(node) => Ok(NodeRef::Anonymous(self.anon(&node))),
            other => Err(VocabDiffError::unrecognized_term(other)),
        }
    }

    fn object(&mut self, object: oxrdf::Term) -> Result<Value> {
        match object {
            oxrdf::Term::NamedNode(node) => Ok(Value::Named(Iri::new(node.into_string()))),
            oxrdf::Term::BlankNode(node) => Ok(Value::Anonymous(self.anon(&node))),
            oxrdf::Term::Literal(literal) => Ok(Value::Literal(convert_literal(&literal))),
            other => Err(VocabDiffError::unrecognized_term(other)),
        }
    }
}

/// `xsd:string` is the implicit datatype of simple literals and is dropped.
fn convert_literal(literal: &oxrdf::Literal) -> Literal {
    if let Some(language) = literal.language() {
        return Literal::lang(literal.value(), language);
    }
    let datatype = literal.datatype();
    if datatype.as_str() == vocab::XSD_STRING {
        Literal::plain(literal.value())
    } else {
        Literal::typed(literal.value(), datatype.as_str())
    }
}
