/// Two-language string table (English / Marathi)
///
/// The active language is process-wide UI state with a trivial lifecycle:
/// it is set at startup, flipped by the toggle in the navbar, and never
/// torn down. Views receive the resolved `Strings` table by reference and
/// treat it as read-only.

/// Display language selected by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    English,
    Marathi,
}

impl Language {
    /// The string table for this language
    pub fn strings(self) -> &'static Strings {
        match self {
            Language::English => &EN,
            Language::Marathi => &MR,
        }
    }

    /// The other language (what the toggle switches to)
    pub fn toggled(self) -> Language {
        match self {
            Language::English => Language::Marathi,
            Language::Marathi => Language::English,
        }
    }

    /// Short label shown on the toggle button: the language you would
    /// switch *to*, mirroring the original settings control
    pub fn toggle_label(self) -> &'static str {
        match self {
            Language::English => "MR",
            Language::Marathi => "EN",
        }
    }
}

/// All user-visible display strings for one language
#[derive(Debug)]
pub struct Strings {
    // Navigation
    pub home: &'static str,
    pub detect: &'static str,
    pub about: &'static str,
    pub contact: &'static str,
    pub get_started: &'static str,

    // Home / Get Started content
    pub welcome: &'static str,
    pub subtitle: &'static str,
    pub upload_image: &'static str,
    pub upload_desc: &'static str,
    pub ai_analysis: &'static str,
    pub ai_desc: &'static str,
    pub get_results: &'static str,
    pub results_desc: &'static str,
    pub accurate_detection: &'static str,
    pub quick_results: &'static str,
    pub detailed_analysis: &'static str,
    pub start_detection: &'static str,
    pub no_registration: &'static str,

    // Detect page
    pub detect_title: &'static str,
    pub upload_prompt: &'static str,
    pub choose_image: &'static str,
    pub change_image: &'static str,
    pub take_photo: &'static str,
    pub capture: &'static str,
    pub cancel: &'static str,
    pub analyzing: &'static str,
    pub analyzing_long: &'static str,
    pub camera_starting: &'static str,
    pub uploaded_image: &'static str,
    pub detection_results: &'static str,
    pub disease: &'static str,
    pub confidence: &'static str,
    pub severity_heading: &'static str,
    pub severity_level: &'static str,
    pub description: &'static str,
    pub affected_area: &'static str,
    pub color_analysis: &'static str,
    pub hue: &'static str,
    pub saturation: &'static str,
    pub value: &'static str,
    pub not_available: &'static str,

    // Warnings and errors
    pub warn_not_image: &'static str,
    pub warn_no_image: &'static str,
    pub warn_camera: &'static str,
    pub warn_unreadable: &'static str,
    pub error_network: &'static str,
}

pub static EN: Strings = Strings {
    home: "Home",
    detect: "Detect Disease",
    about: "About",
    contact: "Contact",
    get_started: "Get Started",

    welcome: "Welcome to Plant Disease Detection",
    subtitle: "Your AI-powered solution for healthier crops",
    upload_image: "Upload Image",
    upload_desc: "Take a clear photo of your plant's leaves or upload an existing image",
    ai_analysis: "AI Analysis",
    ai_desc: "Our advanced AI model analyzes the image for disease patterns",
    get_results: "Get Results",
    results_desc: "Receive detailed diagnosis and treatment recommendations",
    accurate_detection: "Accurate Detection",
    quick_results: "Quick Results",
    detailed_analysis: "Detailed Analysis",
    start_detection: "Start Detection Now",
    no_registration: "No registration required • Free to use",

    detect_title: "Plant Disease Detection",
    upload_prompt: "Upload a plant leaf image for disease detection",
    choose_image: "Choose Image",
    change_image: "Change Image",
    take_photo: "📸 Take Photo",
    capture: "📸 Capture",
    cancel: "❌ Cancel",
    analyzing: "Analyzing...",
    analyzing_long: "Analyzing your plant image...",
    camera_starting: "Starting camera...",
    uploaded_image: "Uploaded Image",
    detection_results: "Detection Results",
    disease: "Disease",
    confidence: "Confidence",
    severity_heading: "Disease Severity",
    severity_level: "Severity Level",
    description: "Description",
    affected_area: "Affected Area",
    color_analysis: "Color Analysis",
    hue: "Hue",
    saturation: "Saturation",
    value: "Value",
    not_available: "N/A",

    warn_not_image: "Please upload an image file.",
    warn_no_image: "Please upload an image first!",
    warn_camera: "Could not access camera. Please allow camera permission.",
    warn_unreadable: "Could not read the selected file.",
    error_network: "An error occurred. Please make sure the backend server is running.",
};

pub static MR: Strings = Strings {
    home: "होम",
    detect: "रोग शोधा",
    about: "आमच्याबद्दल",
    contact: "संपर्क",
    get_started: "सुरू करा",

    welcome: "वनस्पती रोग शोधण्यासाठी आपले स्वागत आहे",
    subtitle: "आपल्या पिकांसाठी AI-आधारित समाधान",
    upload_image: "प्रतिमा अपलोड करा",
    upload_desc: "आपल्या वनस्पतीच्या पानांची स्पष्ट फोटो काढा किंवा विद्यमान प्रतिमा अपलोड करा",
    ai_analysis: "AI विश्लेषण",
    ai_desc: "आमचा प्रगत AI मॉडेल रोगाच्या नमुन्यांसाठी प्रतिमेचे विश्लेषण करतो",
    get_results: "निकाल मिळवा",
    results_desc: "विस्तृत निदान आणि उपचार शिफारसी प्राप्त करा",
    accurate_detection: "अचूक शोधण",
    quick_results: "द्रुत परिणाम",
    detailed_analysis: "विस्तृत विश्लेषण",
    start_detection: "आता शोधण सुरू करा",
    no_registration: "नोंदणी आवश्यक नाही • विनामूल्य",

    detect_title: "वनस्पती रोग शोध",
    upload_prompt: "रोग शोधण्यासाठी वनस्पतीच्या पानाची प्रतिमा अपलोड करा",
    choose_image: "प्रतिमा निवडा",
    change_image: "प्रतिमा बदला",
    take_photo: "📸 फोटो काढा",
    capture: "📸 कॅप्चर",
    cancel: "❌ रद्द करा",
    analyzing: "विश्लेषण करत आहे...",
    analyzing_long: "आपल्या वनस्पती प्रतिमेचे विश्लेषण करत आहे...",
    camera_starting: "कॅमेरा सुरू होत आहे...",
    uploaded_image: "अपलोड केलेली प्रतिमा",
    detection_results: "शोध निकाल",
    disease: "रोग",
    confidence: "विश्वासार्हता",
    severity_heading: "रोगाची तीव्रता",
    severity_level: "तीव्रता पातळी",
    description: "वर्णन",
    affected_area: "प्रभावित क्षेत्र",
    color_analysis: "रंग विश्लेषण",
    hue: "रंगछटा",
    saturation: "संपृक्तता",
    value: "मूल्य",
    not_available: "N/A",

    warn_not_image: "कृपया प्रतिमा फाइल अपलोड करा.",
    warn_no_image: "कृपया प्रथम प्रतिमा अपलोड करा!",
    warn_camera: "कॅमेरा वापरता आला नाही. कृपया कॅमेरा परवानगी द्या.",
    warn_unreadable: "निवडलेली फाइल वाचता आली नाही.",
    error_network: "त्रुटी आली. कृपया बॅकएंड सर्व्हर चालू असल्याची खात्री करा.",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_round_trip() {
        let lang = Language::English;
        assert_eq!(lang.toggled(), Language::Marathi);
        assert_eq!(lang.toggled().toggled(), Language::English);
    }

    #[test]
    fn test_toggle_label_names_other_language() {
        assert_eq!(Language::English.toggle_label(), "MR");
        assert_eq!(Language::Marathi.toggle_label(), "EN");
    }

    #[test]
    fn test_tables_differ() {
        // Both tables are real translations, not copies of each other
        assert_ne!(Language::English.strings().welcome, Language::Marathi.strings().welcome);
        assert_ne!(Language::English.strings().detect, Language::Marathi.strings().detect);
    }
}
