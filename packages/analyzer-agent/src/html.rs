// ABOUTME: HTML rendering for analysis reports and document listings
// ABOUTME: Emits structural tags only (h3, ul, li, b, p, br, code)

use crate::analysis::{ClauseItem, ContractAnalysis, Criticality};
use crate::retriever::DocumentSummary;

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn criticality_label(criticality: Criticality) -> &'static str {
    match criticality {
        Criticality::High => "HIGH",
        Criticality::Medium => "MEDIUM",
        Criticality::Low => "LOW",
    }
}

fn render_items(items: &[ClauseItem]) -> String {
    if items.is_empty() {
        return "<p>None identified.</p>".to_string();
    }
    let entries: String = items
        .iter()
        .map(|item| {
            format!(
                "<li><b>Party:</b> {}<br><b>Description:</b> {}<br>\
                 <b>Reference:</b> {}<br><b>Criticality:</b> {}</li>",
                escape(&item.party),
                escape(&item.description),
                escape(&item.reference),
                criticality_label(item.criticality),
            )
        })
        .collect();
    format!("<ul>{entries}</ul>")
}

/// Full analysis report for one document.
pub fn render_analysis_report(
    document_id: &str,
    filename: &str,
    analysis: &ContractAnalysis,
) -> String {
    let store_notice = format!(
        "<p>To store this analysis, paste it back with the instruction:<br>\
         <b>Store the analysis of document {}</b></p>",
        escape(document_id)
    );

    format!(
        "<h3>Contract Analysis: {filename}</h3>\
         {store_notice}\
         <h3>Rights Identified</h3>{rights}\
         <h3>Obligations Identified</h3>{obligations}\
         <h3>Prohibitions Identified</h3>{prohibitions}\
         <h3>Summary</h3><ul>\
         <li><b>Total rights:</b> {n_rights}</li>\
         <li><b>Total obligations:</b> {n_obligations}</li>\
         <li><b>Total prohibitions:</b> {n_prohibitions}</li>\
         <li><b>Critical elements:</b> {n_critical}</li>\
         </ul>",
        filename = escape(filename),
        rights = render_items(&analysis.rights),
        obligations = render_items(&analysis.obligations),
        prohibitions = render_items(&analysis.prohibitions),
        n_rights = analysis.rights.len(),
        n_obligations = analysis.obligations.len(),
        n_prohibitions = analysis.prohibitions.len(),
        n_critical = analysis.critical_elements(),
    )
}

/// Listing shown when the user asked for analysis without naming a document.
pub fn render_available_documents(documents: &[DocumentSummary]) -> String {
    let items: String = documents
        .iter()
        .map(|d| {
            format!(
                "<li><b>{}</b><br><b>ID:</b> <code>{}</code><br>\
                 <b>Stored:</b> {}<br><b>Chunks:</b> {}</li>",
                escape(&d.filename),
                escape(&d.document_id),
                d.stored_at.format("%Y-%m-%d"),
                d.num_chunks,
            )
        })
        .collect();
    format!(
        "<h3>Documents available for analysis</h3>\
         <p>Name the document you want analyzed:</p>\
         <ul>{items}</ul>\
         <p><b>Example:</b> \"Analyze the document services_contract.pdf\"</p>"
    )
}

pub fn render_not_found(query: &str, available: &[DocumentSummary]) -> String {
    let available_html = if available.is_empty() {
        "<p>No documents are stored yet.</p>".to_string()
    } else {
        let items: String = available
            .iter()
            .take(5)
            .map(|d| {
                format!(
                    "<li><b>{}</b> <code>{}</code></li>",
                    escape(&d.filename),
                    escape(&d.document_id)
                )
            })
            .collect();
        format!("<h3>Available documents</h3><ul>{items}</ul>")
    };
    format!(
        "<h3>Document not found: '{}'</h3>\
         {available_html}\
         <p>Check the name, include the .pdf extension, or use the full <b>document id</b>.</p>",
        escape(query)
    )
}

pub fn render_ambiguous(query: &str, matches: &[DocumentSummary]) -> String {
    let items: String = matches
        .iter()
        .map(|m| {
            format!(
                "<li><b>{}</b><br><code>{}</code></li>",
                escape(&m.filename),
                escape(&m.document_id)
            )
        })
        .collect();
    format!(
        "<h3>Ambiguous name: multiple documents match '{}'</h3>\
         <ul>{items}</ul>\
         <p>Use the full <b>document id</b> to pick one.</p>",
        escape(query)
    )
}
