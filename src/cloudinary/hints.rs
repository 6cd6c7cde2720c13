use crate::http::Error;

const CONSOLE_URL: &str = "https://console.cloudinary.com/";
const SETTINGS_URL: &str = "https://console.cloudinary.com/settings";

/// Suggested fixes for a failed API call. Empty for API errors without a known cause.
pub fn troubleshooting(error: &Error) -> Vec<String> {
    let Error::ApiError { message, .. } = error else {
        return vec!["Check the network connection and retry".to_owned()];
    };

    let message = message.to_lowercase();

    if message.contains("invalid cloud_name") {
        vec![
            "Your cloud name might be incorrect".to_owned(),
            format!("Check {} for the correct name", CONSOLE_URL),
        ]
    } else if ["invalid api key", "invalid api_key", "api_secret mismatch"]
        .iter()
        .any(|pattern| message.contains(pattern))
    {
        vec![
            "Your API credentials might be incorrect".to_owned(),
            format!("Check {} for the correct values", SETTINGS_URL),
        ]
    } else {
        vec![]
    }
}
