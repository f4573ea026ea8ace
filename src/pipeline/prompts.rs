//! Prompts and fixed reply texts for the query pipeline.

/// Reply when a details query comes from a number with no stored record.
pub const NO_DETAILS_REPLY: &str = "No details found for that number.";

/// Reply when the classifier gives no usable category.
pub const UNCLASSIFIED_REPLY: &str = "Unable to classify your query.";

/// Reply when the response generator fails.
pub const GENERATION_FALLBACK_REPLY: &str = "There was an error processing your request.";

/// System message for the response generator.
pub const RESPONDER_SYSTEM_PROMPT: &str =
    "You are a helpful assistant. Keep your answers concise.";

/// Reference text used as context for general-information queries.
pub const DEFAULT_ORG_SUMMARY: &str = "Bharat Financial Inclusion Limited (BFIL), a 100% \
subsidiary of IndusInd Bank, is a leading player in the financial services sector, offering a \
diverse range of banking and financial solutions aimed at fostering financial inclusion across \
India. Originally established in 1998 as a microfinance institution, BFIL became a wholly owned \
subsidiary of IndusInd Bank following its merger in 2019. As a Business Correspondent of the bank, \
BFIL provides microfinance loans, MSME loans, two-wheeler loans, merchant loans, and personal \
loans, along with savings and investment solutions such as recurring deposits, fixed deposits, and \
current accounts. Serving over 10 million customers across 1.34 lakh villages in 23 Indian states \
through a vast network of 3,178+ branches, BFIL plays a crucial role in enhancing financial \
accessibility in rural and semi-urban areas. Through Bharat Money Store and Bharat Super Shop, the \
company extends banking and transaction services to kirana merchants and small retailers, \
facilitating cash withdrawals, deposits, money transfers, bill payments, and digital transactions \
via mobile and WhatsApp banking. Its Aadhaar-enabled banking services further empower customers \
with seamless biometric-based transactions. BFIL has also established Customer Service Units \
(CSUs) to offer essential banking solutions at the doorstep, ensuring swift query resolution, \
access to government benefits, and improved financial literacy. With a commitment to innovation \
and digitization, BFIL continues to expand its footprint while driving financial empowerment, \
economic growth, and better livelihood opportunities for millions across India.";

/// Build the intent classification prompt for a query.
pub fn classification_prompt(query: &str) -> String {
    format!(
        "Classify the following query into one of two categories:\n\
         1. Checking details - if the query is about verifying or retrieving employee specific details.\n\
         2. Getting information - if the query is about general information or knowledge related to BFIL.\n\n\
         Query: {query}\n\n\
         Respond with only the category number (1 or 2)."
    )
}

/// Build the generator's user message from a query and its context.
pub fn responder_user_prompt(query: &str, context: &str) -> String {
    format!("Query: {query}\nContext: {context}")
}
