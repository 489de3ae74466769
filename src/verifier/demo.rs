use anyhow::Result;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::time::Duration;

use super::traits::Verifier;
use super::types::Payload;

/// Offline engine that answers with canned verdicts.
///
/// Useful for demos and for exercising the interface without a backend.
/// Text is classified by keyword; every other modality has a fixed answer.
pub struct DemoVerifier {
    latency: Duration,
}

impl DemoVerifier {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    fn respond(payload: &Payload) -> Value {
        match payload {
            Payload::Text(text) => {
                let lower = text.to_lowercase();
                if lower.contains("fake") || lower.contains("false") {
                    json!({
                        "final_verdict": "FAKE",
                        "explanation": "Analysis showed high divergence from known real-world data sources, indicating potential manipulation.",
                        "text_articles": []
                    })
                } else if lower.contains("climate") || lower.contains("vaccine") {
                    json!({
                        "final_verdict": "UNCERTAIN",
                        "explanation": "The claim is on a sensitive topic with ongoing debate; review the linked fact-checks for context.",
                        "text_articles": [
                            {
                                "title": "Article 1: Fact Check on Climate Claim",
                                "snippet": "Review of scientific consensus versus public claim.",
                                "link": "#"
                            },
                            {
                                "title": "Article 2: Misinformation About Vaccines",
                                "snippet": "Expert review of common claims and data.",
                                "link": "#"
                            }
                        ]
                    })
                } else {
                    json!({
                        "final_verdict": "REAL",
                        "explanation": "The content appears to align with verified sources and lacks characteristics of typical misinformation.",
                        "text_articles": []
                    })
                }
            }
            Payload::Image(_) => json!({
                "final_verdict": "FAKE",
                "explanation": "Digital forensic analysis detected anomalies suggesting the image was AI-generated or heavily edited.",
                "text_articles": []
            }),
            Payload::Url(_) => json!({
                "final_verdict": "UNCERTAIN",
                "explanation": "The article contains conflicting information from unverified sources. Review the related fact-checks.",
                "text_articles": [
                    {
                        "title": "Source 1: How to Spot Deepfakes",
                        "snippet": "Experts detail the latest methods for detecting AI-generated content.",
                        "link": "#"
                    },
                    {
                        "title": "Source 2: Fact-Check on the Claim",
                        "snippet": "A review of the claim against historical data and official statements.",
                        "link": "#"
                    }
                ]
            }),
            Payload::Audio(_) => json!({
                "final_verdict": "REAL",
                "explanation": "Spectrographic analysis confirms natural human voice inflections and cadence, consistent with known recordings.",
                "transcribed_text": "This is a demonstration of transcribed text from the audio input.",
                "text_articles": []
            }),
        }
    }
}

#[async_trait]
impl Verifier for DemoVerifier {
    async fn verify(&self, payload: &Payload) -> Result<Value> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        Ok(Self::respond(payload))
    }

    fn name(&self) -> String {
        "demo".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verifier::{MediaKind, SelectedFile, Verdict, VerdictLabel};

    async fn verdict_for(payload: Payload) -> Verdict {
        let verifier = DemoVerifier::new(Duration::ZERO);
        Verdict::from_response(&verifier.verify(&payload).await.unwrap())
    }

    #[tokio::test]
    async fn test_text_keywords() {
        let fake = verdict_for(Payload::Text("This is FAKE news".into())).await;
        assert_eq!(fake.classified_label(), Some(VerdictLabel::Fake));

        let uncertain = verdict_for(Payload::Text("climate report".into())).await;
        assert_eq!(uncertain.classified_label(), Some(VerdictLabel::Uncertain));
        assert_eq!(uncertain.related_articles.len(), 2);

        let real = verdict_for(Payload::Text("The sun rose today".into())).await;
        assert_eq!(real.classified_label(), Some(VerdictLabel::Real));
        assert!(real.related_articles.is_empty());
    }

    #[tokio::test]
    async fn test_media_answers() {
        let image = SelectedFile::from_bytes("a.png", vec![0u8], MediaKind::Image);
        let audio = SelectedFile::from_bytes("a.wav", vec![0u8], MediaKind::Audio);

        let image = verdict_for(Payload::Image(image)).await;
        assert_eq!(image.classified_label(), Some(VerdictLabel::Fake));

        let audio = verdict_for(Payload::Audio(audio)).await;
        assert_eq!(audio.classified_label(), Some(VerdictLabel::Real));
        assert!(audio.transcribed_text.is_some());

        let url = verdict_for(Payload::Url("https://example.com".into())).await;
        assert_eq!(url.classified_label(), Some(VerdictLabel::Uncertain));
        assert_eq!(url.related_articles.len(), 2);
    }
}
