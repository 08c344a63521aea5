//! Built-in demo catalog.
//!
//! A small slice of the production course list, handy for tests, seeding,
//! and local development without a catalog collaborator.

use learnhub_core::model::{Course, CourseDraft, CourseId, Lesson, LessonId, Level};

use crate::error::CatalogError;

/// Default lesson topics, cycled when a course needs more lessons than
/// topics.
pub const DEFAULT_LESSON_TOPICS: [&str; 10] = [
    "Introduction and Setup",
    "Core Concepts",
    "Practical Examples",
    "Advanced Techniques",
    "Best Practices",
    "Real-world Projects",
    "Troubleshooting",
    "Performance Optimization",
    "Security Considerations",
    "Deployment Strategies",
];

/// Generate `count` lessons with ids `{prefix}-lesson-{n}` and cycled
/// default topics.
///
/// # Errors
///
/// Returns `CatalogError` if lesson validation fails (it cannot for the
/// built-in topics, but the constructor is fallible).
pub fn generate_lessons(prefix: &str, count: usize) -> Result<Vec<Lesson>, CatalogError> {
    (0..count)
        .map(|i| {
            let title = DEFAULT_LESSON_TOPICS[i % DEFAULT_LESSON_TOPICS.len()];
            let lesson = Lesson::new(
                LessonId::numbered(prefix, i + 1),
                title,
                "Comprehensive lesson with hands-on exercises and real-world applications.",
                600 + (i as u32 % 5) * 120,
            )?;
            Ok(lesson)
        })
        .collect()
}

struct SampleSpec {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    level: Level,
    price: f32,
    duration: &'static str,
    students: u32,
    rating: f32,
    skills: &'static [&'static str],
    instructor: &'static str,
    lesson_prefix: &'static str,
    lesson_count: usize,
}

const SAMPLE_COURSES: [SampleSpec; 5] = [
    SampleSpec {
        id: "react-complete-guide",
        title: "React Complete Guide",
        description: "Build modern React applications with hooks, context, and best practices.",
        level: Level::Beginner,
        price: 49.0,
        duration: "12h 10m",
        students: 32_500,
        rating: 4.7,
        skills: &["JavaScript", "React", "Frontend"],
        instructor: "Sarah Johnson",
        lesson_prefix: "react",
        lesson_count: 12,
    },
    SampleSpec {
        id: "nodejs-mastery",
        title: "Node.js Mastery",
        description: "Backend development with Node.js, Express, and MongoDB.",
        level: Level::Intermediate,
        price: 59.0,
        duration: "10h 45m",
        students: 18_420,
        rating: 4.6,
        skills: &["Node.js", "Express", "MongoDB", "Backend"],
        instructor: "Michael Chen",
        lesson_prefix: "node",
        lesson_count: 10,
    },
    SampleSpec {
        id: "python-data-science",
        title: "Python for Data Science",
        description: "Analyze data and build ML models with Python, Pandas, and scikit-learn.",
        level: Level::Intermediate,
        price: 69.0,
        duration: "14h 20m",
        students: 22_110,
        rating: 4.8,
        skills: &["Python", "Data Science", "Machine Learning", "Analytics"],
        instructor: "Priya Singh",
        lesson_prefix: "pyds",
        lesson_count: 14,
    },
    SampleSpec {
        id: "design-figma",
        title: "Product Design with Figma",
        description: "Design beautiful user interfaces and flows using Figma.",
        level: Level::Beginner,
        price: 39.0,
        duration: "7h 30m",
        students: 10_230,
        rating: 4.5,
        skills: &["Design", "UI Design", "UX Design", "Figma"],
        instructor: "Andrea Müller",
        lesson_prefix: "figma",
        lesson_count: 8,
    },
    SampleSpec {
        id: "git-github-mastery",
        title: "Git & GitHub Mastery",
        description: "Master version control and collaborative development.",
        level: Level::Beginner,
        price: 35.0,
        duration: "6h 45m",
        students: 45_670,
        rating: 4.8,
        skills: &["Git", "GitHub", "Version Control", "Collaboration"],
        instructor: "Tom Wilson",
        lesson_prefix: "git",
        lesson_count: 8,
    },
];

/// The built-in demo catalog.
///
/// # Errors
///
/// Returns `CatalogError` if any built-in course fails validation.
pub fn sample_catalog() -> Result<Vec<Course>, CatalogError> {
    SAMPLE_COURSES
        .iter()
        .map(|spec| {
            let course = CourseDraft {
                id: CourseId::new(spec.id),
                title: spec.title.to_string(),
                description: spec.description.to_string(),
                level: spec.level,
                price: spec.price,
                duration: spec.duration.to_string(),
                students: spec.students,
                rating: spec.rating,
                skills: spec.skills.iter().map(|s| (*s).to_string()).collect(),
                instructor: spec.instructor.to_string(),
                thumbnail: String::new(),
                lessons: generate_lessons(spec.lesson_prefix, spec.lesson_count)?,
            }
            .validate()?;
            Ok(course)
        })
        .collect()
}
