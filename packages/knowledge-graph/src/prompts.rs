//! LLM prompts for extraction, entity resolution, and inference.
//!
//! All prompts share three hard rules the validator depends on:
//! predicates are at most 3 words, output is a bare JSON payload, and
//! entity names are lower-case.

/// System prompt for triple extraction.
pub const EXTRACTION_SYSTEM_PROMPT: &str = "\
You are an advanced system specialized in knowledge extraction and knowledge graph generation.
Your expertise includes identifying consistent entity references and meaningful relationships in text.
CRITICAL INSTRUCTION: All relationships (predicates) MUST be no more than 3 words maximum. Ideally 1-2 words. This is a hard limit.";

/// User prompt template for triple extraction; the chunk text follows.
const EXTRACTION_PROMPT: &str = r#"Read the text below (delimited by triple backticks) and identify every Subject-Predicate-Object relationship it states. Produce a single JSON array of objects, one per triple.

Rules:
- Entity consistency: use one consistent name for an entity everywhere it appears, preferably its most complete form.
- Atomic terms: keep subjects and objects as small, distinct terms; never merge several ideas into one term.
- Resolve pronouns to the entity they refer to whenever identifiable.
- Create one triple for each meaningfully related pair of terms that co-occur.
- Predicates MUST be 1-3 words maximum. Never more than 3 words.
- Write all subject, predicate and object text in lower-case, including names of people and places.
- If a person is named, also relate them to their location, profession and notable works when the text supports it.

Output requirements:
- Return only the JSON array, each element an object with "subject", "predicate" and "object" keys.
- Do not include any text or commentary outside of the JSON.

Example of the desired output structure:

[
  {"subject": "term a", "predicate": "relates to", "object": "term b"},
  {"subject": "term c", "predicate": "uses", "object": "term d"}
]

Text to analyze (between triple backticks):
"#;

/// Build the extraction user prompt for one chunk.
pub fn format_extraction_prompt(chunk: &str) -> String {
    format!("{EXTRACTION_PROMPT}```\n{chunk}```\n")
}

/// System prompt for entity resolution.
pub const ENTITY_RESOLUTION_SYSTEM_PROMPT: &str = "\
You are an expert in entity resolution and knowledge representation.
Your task is to standardize entity names from a knowledge graph to ensure consistency.";

/// Build the entity resolution user prompt from the distinct entity list.
pub fn format_entity_resolution_prompt(entities: &[String]) -> String {
    format!(
        r#"Below is a list of entity names extracted from a knowledge graph.
Some of them may refer to the same real-world entity with different wording.

Identify groups of names that refer to the same entity and give each group a standardized name.
Respond with a JSON object whose keys are the standardized names and whose values are arrays of all variant names that should map to that standard name.
Only include entities that have multiple variants or need standardization.

Entity list:
{}

Format your response as valid JSON like this:
{{
  "standardized name 1": ["variant 1", "variant 2"],
  "standardized name 2": ["variant 3", "variant 4", "variant 5"]
}}
"#,
        entities.join(", ")
    )
}

/// System prompt for cross-community relationship inference.
pub const RELATIONSHIP_INFERENCE_SYSTEM_PROMPT: &str = "\
You are an expert in knowledge representation and inference.
Your task is to infer plausible relationships between disconnected entities in a knowledge graph.";

/// Build the cross-community inference user prompt.
pub fn format_relationship_inference_prompt(
    community_a: &[String],
    community_b: &[String],
    context_triples: &str,
) -> String {
    format!(
        r#"I have a knowledge graph with two disconnected communities of entities.

Community 1 entities: {}
Community 2 entities: {}

Here are some existing relationships involving these entities:
{context_triples}

Infer 2-3 plausible relationships between entities of community 1 and entities of community 2.
Respond with a JSON array of triples in this format:

[
  {{"subject": "entity from community 1", "predicate": "inferred relationship", "object": "entity from community 2"}}
]

Only include highly plausible relationships with clear predicates.
IMPORTANT: the inferred predicates MUST be no more than 3 words maximum, preferably 1-2 words.
IMPORTANT: make sure the subject and object are different entities - avoid self-references.
"#,
        community_a.join(", "),
        community_b.join(", "),
    )
}

/// System prompt for within-community relationship inference.
pub const WITHIN_COMMUNITY_SYSTEM_PROMPT: &str = "\
You are an expert in knowledge representation and inference.
Your task is to infer plausible relationships between semantically related entities that are not yet connected in a knowledge graph.";

/// Build the within-community inference user prompt.
pub fn format_within_community_prompt(pairs: &str, context_triples: &str) -> String {
    format!(
        r#"I have a knowledge graph with several entities that appear to be semantically related but are not directly connected.

Here are some pairs of entities that might be related:
{pairs}

Here are some existing relationships involving these entities:
{context_triples}

Infer plausible relationships between these disconnected pairs.
Respond with a JSON array of triples in this format:

[
  {{"subject": "entity1", "predicate": "inferred relationship", "object": "entity2"}}
]

Only include highly plausible relationships with clear predicates.
IMPORTANT: the inferred predicates MUST be no more than 3 words maximum, preferably 1-2 words.
IMPORTANT: make sure the subject and object are different entities - avoid self-references.
"#
    )
}
