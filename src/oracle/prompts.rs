use super::NOT_FOUND;

/// Instruction for finding the login URL in a page
pub fn locate_login_link(html: &str) -> String {
    format!(
        "You are an expert web navigator. Find the Login/Sign-in URL in this HTML.\n\
         Look at 'href' and 'data-url' attributes.\n\
         Return ONLY the raw URL string. If there is none, return \"{NOT_FOUND}\".\n\
         \n\
         HTML:\n\
         {html}"
    )
}

/// Instruction for isolating the authentication form in a page
pub fn extract_auth_snippet(html: &str) -> String {
    format!(
        "You are a web automation agent.\n\
         Extract the raw HTML of the login form or authentication container.\n\
         \n\
         Rules:\n\
         1. Return ONLY raw HTML.\n\
         2. Exclude search bars, footers and site navigation.\n\
         3. If there is no login form, return \"{NOT_FOUND}\".\n\
         \n\
         HTML:\n\
         {html}"
    )
}
