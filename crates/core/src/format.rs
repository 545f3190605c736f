use crate::types::SummarizeResponse;

/// Format seconds as a short human duration, e.g. `850ms` or `2.41s`.
pub fn format_duration(seconds: f64) -> String {
    if seconds < 1.0 {
        format!("{:.0}ms", seconds * 1000.0)
    } else {
        format!("{:.2}s", seconds)
    }
}

pub fn format_response_readable(response: &SummarizeResponse) -> String {
    let mut output = String::new();
    output.push_str("# Summary\n\n");
    output.push_str(&response.summary);
    output.push_str("\n\n");

    output.push_str("## Details\n\n");
    output.push_str(&format!("• Source: {}\n", response.transcript_source));
    output.push_str(&format!(
        "• Words: {} → {}\n",
        response.original_length, response.summary_length
    ));
    if response.chunks_processed > 0 {
        output.push_str(&format!(
            "• Chunks: {} (LSA intermediate: {} words)\n",
            response.chunks_processed, response.lsa_intermediate_length
        ));
    }
    output.push_str(&format!("• API calls: {}\n", response.api_calls_made));
    output.push_str(&format!(
        "• Time: {}\n",
        format_duration(response.processing_time)
    ));
    if response.used_fallback {
        output.push_str("• Remote model unavailable, extractive summary shown\n");
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(chunks: usize, used_fallback: bool) -> SummarizeResponse {
        SummarizeResponse {
            summary: "Ownership keeps memory safe.".to_string(),
            transcript_source: "file".to_string(),
            original_length: 1800,
            summary_length: 4,
            chunks_processed: chunks,
            lsa_intermediate_length: 240,
            api_calls_made: 1,
            processing_time: 3.456,
            used_fallback,
        }
    }

    #[test]
    fn formats_durations() {
        assert_eq!(format_duration(0.25), "250ms");
        assert_eq!(format_duration(2.414), "2.41s");
    }

    #[test]
    fn renders_long_path_details() {
        let text = format_response_readable(&response(2, false));

        assert!(text.starts_with("# Summary\n\nOwnership keeps memory safe."));
        assert!(text.contains("• Words: 1800 → 4"));
        assert!(text.contains("• Chunks: 2 (LSA intermediate: 240 words)"));
        assert!(text.contains("• Time: 3.46s"));
        assert!(!text.contains("extractive summary"));
    }

    #[test]
    fn short_path_omits_chunks_and_flags_fallback() {
        let text = format_response_readable(&response(0, true));

        assert!(!text.contains("Chunks"));
        assert!(text.contains("extractive summary shown"));
    }
}
