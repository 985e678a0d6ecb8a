use chrono::{DateTime, Utc};

use crate::domain::entities::{pricing_plans::PricingPlanEntity, testimonials::TestimonialEntity};

/// Demo pricing plans shown before any admin edits.
pub fn pricing_plans(now: DateTime<Utc>) -> Vec<PricingPlanEntity> {
    vec![
        plan(
            "1",
            "Basic",
            "Your foundation for a healthier life!",
            "500,000.00",
            &[
                "Full body scan",
                "Personalized meal plans",
                "Coaching and lifestyle guidance",
                "Detox and body cleansing strategies",
                "Exclusive health and wellness resources",
            ],
            now,
        ),
        plan(
            "2",
            "Premium",
            "Upgrade to an elite level of health!",
            "1,200,000.00",
            &[
                "Basic Package",
                "Advanced metabolic reprogramming",
                "Private coaching sessions",
                "Stress and lifestyle optimization",
                "Supplement recommendations",
            ],
            now,
        ),
        plan(
            "3",
            "Executive",
            "The Ultimate Health Transformation",
            "6,000,000.00",
            &[
                "Premium Package",
                "24/7 access to health experts",
                "Full-body detox and electrification",
                "Luxury wellness retreat and spa",
                "Holistic therapy sessions",
                "Personalized workouts",
                "Lifetime access to health materials",
            ],
            now,
        ),
    ]
}

pub fn testimonials() -> Vec<TestimonialEntity> {
    vec![
        TestimonialEntity {
            id: "1".to_string(),
            name: "Sarah Johnson".to_string(),
            location: "Los Angeles, CA".to_string(),
            review: "Amazing products! I love the quality and taste. Highly recommend to everyone \
                     looking for healthy plant-based options."
                .to_string(),
            avatar: String::new(),
        },
        TestimonialEntity {
            id: "2".to_string(),
            name: "Michael Chen".to_string(),
            location: "San Francisco, CA".to_string(),
            review: "Best decision I ever made switching to these products. My energy levels have \
                     never been better!"
                .to_string(),
            avatar: String::new(),
        },
    ]
}

fn plan(
    id: &str,
    name: &str,
    subtitle: &str,
    price: &str,
    features: &[&str],
    created_at: DateTime<Utc>,
) -> PricingPlanEntity {
    PricingPlanEntity {
        id: id.to_string(),
        name: name.to_string(),
        subtitle: subtitle.to_string(),
        price: price.to_string(),
        features: features.iter().map(|f| f.to_string()).collect(),
        created_at,
    }
}
