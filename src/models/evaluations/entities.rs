use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 推荐意向
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "evaluation.ts")]
pub enum Recommendation {
    Yes,
    No,
    Maybe,
}

impl Recommendation {
    pub const YES: &'static str = "yes";
    pub const NO: &'static str = "no";
    pub const MAYBE: &'static str = "maybe";
}

impl<'de> Deserialize<'de> for Recommendation {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|_| {
            serde::de::Error::custom(format!(
                "Invalid recommendation: '{s}'. Expected one of: yes, no, maybe"
            ))
        })
    }
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Recommendation::Yes => write!(f, "{}", Recommendation::YES),
            Recommendation::No => write!(f, "{}", Recommendation::NO),
            Recommendation::Maybe => write!(f, "{}", Recommendation::MAYBE),
        }
    }
}

impl std::str::FromStr for Recommendation {
    type Err = String;

    // 兼容表单中的西班牙语取值
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "yes" | "si" | "sí" => Ok(Recommendation::Yes),
            "no" => Ok(Recommendation::No),
            "maybe" | "tal_vez" | "tal vez" => Ok(Recommendation::Maybe),
            _ => Err(format!("Invalid recommendation: {s}")),
        }
    }
}

// 六项评分
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[ts(export, export_to = "evaluation.ts")]
pub struct Ratings {
    pub subject_mastery: i32,
    pub explanation_clarity: i32,
    pub punctuality: i32,
    pub availability: i32,
    pub methodology: i32,
    pub overall: i32,
}

impl Ratings {
    pub fn as_array(&self) -> [i32; 6] {
        [
            self.subject_mastery,
            self.explanation_clarity,
            self.punctuality,
            self.availability,
            self.methodology,
            self.overall,
        ]
    }

    /// 检查所有评分是否在 [min, max] 区间内，返回第一个越界项的名称
    pub fn first_out_of_range(&self, min: i32, max: i32) -> Option<&'static str> {
        const NAMES: [&str; 6] = [
            "subject_mastery",
            "explanation_clarity",
            "punctuality",
            "availability",
            "methodology",
            "overall",
        ];
        self.as_array()
            .iter()
            .zip(NAMES)
            .find(|(v, _)| !(min..=max).contains(*v))
            .map(|(_, name)| name)
    }

    /// 六项平均分，保留两位小数
    pub fn average(&self) -> f64 {
        let sum: i32 = self.as_array().iter().sum();
        round2(sum as f64 / 6.0)
    }

    pub fn lowest(&self) -> i32 {
        self.as_array().into_iter().min().unwrap_or_default()
    }

    pub fn highest(&self) -> i32 {
        self.as_array().into_iter().max().unwrap_or_default()
    }
}

pub(crate) fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

// 教学评价实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "evaluation.ts")]
pub struct Evaluation {
    pub id: i64,
    pub student_id: i64,
    pub professor_id: i64,
    pub ratings: Ratings,
    pub average: f64,
    pub positive_aspects: Option<String>,
    pub improvement_aspects: Option<String>,
    pub general_comments: Option<String>,
    pub recommendation: Recommendation,
    pub semester: i32,
    pub academic_period: String,
    pub evaluated_at: chrono::DateTime<chrono::Utc>,
}

// 各项平均分
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "evaluation.ts")]
pub struct CriteriaAverages {
    pub subject_mastery: f64,
    pub explanation_clarity: f64,
    pub punctuality: f64,
    pub availability: f64,
    pub methodology: f64,
    pub overall: f64,
}

// 推荐意向统计
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "evaluation.ts")]
pub struct RecommendationCounts {
    pub yes: i64,
    pub no: i64,
    pub maybe: i64,
}

// 教师评价汇总
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "evaluation.ts")]
pub struct EvaluationStats {
    pub total: i64,
    pub averages: CriteriaAverages,
    pub overall_average: f64,
    pub recommendations: RecommendationCounts,
}

impl EvaluationStats {
    pub fn from_ratings<I>(items: I) -> Self
    where
        I: IntoIterator<Item = (Ratings, Recommendation)>,
    {
        let mut sums = [0i64; 6];
        let mut stats = EvaluationStats::default();

        for (ratings, recommendation) in items {
            stats.total += 1;
            for (sum, v) in sums.iter_mut().zip(ratings.as_array()) {
                *sum += v as i64;
            }
            match recommendation {
                Recommendation::Yes => stats.recommendations.yes += 1,
                Recommendation::No => stats.recommendations.no += 1,
                Recommendation::Maybe => stats.recommendations.maybe += 1,
            }
        }

        if stats.total == 0 {
            return stats;
        }

        let n = stats.total as f64;
        let avg = |i: usize| round2(sums[i] as f64 / n);
        stats.averages = CriteriaAverages {
            subject_mastery: avg(0),
            explanation_clarity: avg(1),
            punctuality: avg(2),
            availability: avg(3),
            methodology: avg(4),
            overall: avg(5),
        };
        stats.overall_average = round2(sums.iter().sum::<i64>() as f64 / (n * 6.0));
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ratings(v: [i32; 6]) -> Ratings {
        Ratings {
            subject_mastery: v[0],
            explanation_clarity: v[1],
            punctuality: v[2],
            availability: v[3],
            methodology: v[4],
            overall: v[5],
        }
    }

    #[test]
    fn test_recommendation_aliases() {
        assert_eq!("sí".parse::<Recommendation>(), Ok(Recommendation::Yes));
        assert_eq!("SI".parse::<Recommendation>(), Ok(Recommendation::Yes));
        assert_eq!("tal_vez".parse::<Recommendation>(), Ok(Recommendation::Maybe));
        assert_eq!("no".parse::<Recommendation>(), Ok(Recommendation::No));
        assert!("quizas".parse::<Recommendation>().is_err());
        assert_eq!(Recommendation::Maybe.to_string(), "maybe");
    }

    #[test]
    fn test_ratings_average_and_range() {
        let r = ratings([5, 4, 4, 3, 5, 4]);
        assert_eq!(r.average(), 4.17);
        assert_eq!(r.lowest(), 3);
        assert_eq!(r.highest(), 5);
        assert_eq!(r.first_out_of_range(1, 5), None);
        assert_eq!(
            ratings([5, 0, 4, 3, 5, 4]).first_out_of_range(1, 5),
            Some("explanation_clarity")
        );
        assert_eq!(
            ratings([5, 5, 5, 5, 5, 6]).first_out_of_range(1, 5),
            Some("overall")
        );
    }

    #[test]
    fn test_stats_aggregation() {
        let stats = EvaluationStats::from_ratings(vec![
            (ratings([5, 5, 5, 5, 5, 5]), Recommendation::Yes),
            (ratings([3, 4, 3, 4, 3, 4]), Recommendation::Maybe),
        ]);
        assert_eq!(stats.total, 2);
        assert_eq!(stats.averages.subject_mastery, 4.0);
        assert_eq!(stats.averages.explanation_clarity, 4.5);
        assert_eq!(stats.overall_average, 4.25);
        assert_eq!(stats.recommendations.yes, 1);
        assert_eq!(stats.recommendations.maybe, 1);
        assert_eq!(stats.recommendations.no, 0);
    }

    #[test]
    fn test_stats_empty() {
        let stats = EvaluationStats::from_ratings(Vec::new());
        assert_eq!(stats, EvaluationStats::default());
    }
}
