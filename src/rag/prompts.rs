//! Prompt templates for the pipeline's LLM calls.
//!
//! Templates are data, not logic; every call site fills one of these.

/// Ask the model whether a query belongs to the medical domain.
pub fn relevance_check(query: &str) -> String {
    format!(
        "Check the following query and tell if it is a medical related query \
         for a doctor chatbot or not.\n\
         Query: {query}\n\
         Just reply \"Yes\" if it is and \"No\" if it is not a medical or \
         related query for a doctor chatbot."
    )
}

/// Compress raw retrieved passages into a structured disease-information
/// paragraph.
pub fn context_summary(context: &str) -> String {
    format!(
        "Extract the following details and combine them in the form of a \
         detailed information paragraph from the following context \
         information about a disease:\n\
         1. Names of the possible diseases mentioned\n\
         2. Symptoms mentioned for each disease\n\
         3. Possible causes mentioned for each disease\n\
         4. Medical advice or recommendations mentioned for each disease\n\n\
         Context: {context}"
    )
}

/// Generate the grounded answer from query, summarized context, and
/// transcript.
pub fn grounded_answer(query: &str, context: &str, history: &str) -> String {
    format!(
        "Role: You are a medical AI bot tasked with providing a diagnosis \
         based on the user's mentioned symptoms and the given disease \
         context.\n\n\
         Inputs:\n\n\
         Question: {query}\n\n\
         Possible Disease Context: {context}\n\n\
         User Chat History: {history}\n\n\
         Instructions:\n\
         1. Use the provided chat history, query, and relevant medical \
         information to formulate your response.\n\
         2. If unsure, respond with \"I don't know.\"\n\
         3. Ensure the answer is both relevant and comprehensive.\n\
         4. Keep the response concise, limited to 2-3 sentences.\n\
         5. Answer in a conversational manner, incorporating insights from \
         the disease context."
    )
}

/// Answer an out-of-domain query from the transcript alone.
pub fn fallback_answer(query: &str, history: &str) -> String {
    format!(
        "Based on the following chat history between an AI doctor bot and a \
         patient, reply to the query: {query}\n\
         Chat history: {history}\n\
         Note:\n\
         1. You can add information to create a credible answer but the \
         answer should not exceed 1-2 sentences.\n\
         2. If the query is not relevant to any medical domain or problem \
         and has no reference relating to the chat history then just respond \
         \"Sorry, I am a medical AI chatbot, I only answer medical related \
         queries\"."
    )
}

/// Answer over text extracted from an uploaded medical report.
pub fn report_answer(report_text: &str, history: &str) -> String {
    format!(
        "Based on the following text extracted from a medical report, \
         provide a diagnosis or advice:\n\n\
         {report_text}\n\n\
         User Chat History: {history}"
    )
}
