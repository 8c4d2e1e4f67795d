//! Academic taxonomy catalog.
//!
//! A static tree of DegreeType -> Degree -> (optional Specialization) ->
//! Semester -> Subject. Built once per process, read-only thereafter, and
//! therefore shareable across threads without synchronization.
//!
//! Lookups are deliberately forgiving: an unknown key anywhere in the
//! chain yields `None` or an empty slice, never an error, so UI flows can
//! probe the tree speculatively.

use serde::{Deserialize, Serialize};

/// Leaf of the taxonomy: a subject within a semester.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub id: String,
    pub name: String,
    pub description: String,
}

/// A semester and its ordered subjects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Semester {
    pub id: String,
    pub name: String,
    pub description: String,
    pub subjects: Vec<Subject>,
}

/// An optional branch within a degree (e.g. B.Tech CS vs IT). Present only
/// for degrees that defer their semester listing to a chosen track.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Specialization {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub description: String,
    pub semesters: Vec<Semester>,
}

/// A degree program. Exactly one of `semesters` / `specializations` is the
/// active path: a degree with specializations lists no semesters of its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Degree {
    pub id: String,
    pub name: String,
    pub full_name: String,
    pub description: String,
    pub duration: String,
    pub semesters: Vec<Semester>,
    pub specializations: Vec<Specialization>,
}

impl Degree {
    /// Whether this degree defers semester listing to a specialization.
    pub fn has_specializations(&self) -> bool {
        !self.specializations.is_empty()
    }
}

/// Root grouping of degrees (diploma, bachelors, masters).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DegreeType {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub description: String,
    pub duration: String,
    pub degrees: Vec<Degree>,
}

/// Outcome of resolving `(degree type, degree[, specialization])` to a
/// semester listing.
///
/// `NeedsSpecialization` is the two-phase disclosure case: the degree
/// exists but its semesters live under a specialization the caller has
/// not picked yet. It is not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SemesterResolution<'a> {
    Resolved(&'a [Semester]),
    NeedsSpecialization,
    NotFound,
}

/// The full taxonomy tree. Construct once via [`Catalog::standard`] (or
/// [`Catalog::new`] for custom trees) and share.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    degree_types: Vec<DegreeType>,
}

impl Catalog {
    /// Build a catalog from an explicit set of degree types.
    pub fn new(degree_types: Vec<DegreeType>) -> Self {
        Self { degree_types }
    }

    /// All degree types, in construction order.
    pub fn degree_types(&self) -> &[DegreeType] {
        &self.degree_types
    }

    /// Look up a degree type by id.
    pub fn degree_type(&self, id: &str) -> Option<&DegreeType> {
        self.degree_types.iter().find(|dt| dt.id == id)
    }

    /// Look up a degree through its degree type. `None` if either key is
    /// unknown.
    pub fn degree(&self, degree_type_id: &str, degree_id: &str) -> Option<&Degree> {
        self.degree_type(degree_type_id)?
            .degrees
            .iter()
            .find(|d| d.id == degree_id)
    }

    /// Look up a specialization within a degree.
    pub fn specialization(
        &self,
        degree_type_id: &str,
        degree_id: &str,
        specialization_id: &str,
    ) -> Option<&Specialization> {
        self.degree(degree_type_id, degree_id)?
            .specializations
            .iter()
            .find(|s| s.id == specialization_id)
    }

    /// All specializations of a degree; empty for unknown keys or degrees
    /// without specializations.
    pub fn specializations(&self, degree_type_id: &str, degree_id: &str) -> &[Specialization] {
        self.degree(degree_type_id, degree_id)
            .map(|d| d.specializations.as_slice())
            .unwrap_or(&[])
    }

    /// Resolve a semester listing, distinguishing "pick a specialization
    /// first" from "no such node".
    pub fn resolve_semesters(
        &self,
        degree_type_id: &str,
        degree_id: &str,
        specialization_id: Option<&str>,
    ) -> SemesterResolution<'_> {
        let Some(degree) = self.degree(degree_type_id, degree_id) else {
            return SemesterResolution::NotFound;
        };

        if degree.has_specializations() {
            return match specialization_id {
                Some(spec_id) => degree
                    .specializations
                    .iter()
                    .find(|s| s.id == spec_id)
                    .map(|s| SemesterResolution::Resolved(s.semesters.as_slice()))
                    .unwrap_or(SemesterResolution::NotFound),
                None => SemesterResolution::NeedsSpecialization,
            };
        }

        SemesterResolution::Resolved(degree.semesters.as_slice())
    }

    /// Semester listing with the two-phase disclosure policy collapsed to
    /// an empty slice: a degree that requires a specialization yields no
    /// semesters until one is supplied.
    pub fn semesters(
        &self,
        degree_type_id: &str,
        degree_id: &str,
        specialization_id: Option<&str>,
    ) -> &[Semester] {
        match self.resolve_semesters(degree_type_id, degree_id, specialization_id) {
            SemesterResolution::Resolved(semesters) => semesters,
            SemesterResolution::NeedsSpecialization | SemesterResolution::NotFound => &[],
        }
    }

    /// Subjects of a semester; empty for any unknown key in the chain.
    pub fn subjects(
        &self,
        degree_type_id: &str,
        degree_id: &str,
        semester_id: &str,
        specialization_id: Option<&str>,
    ) -> &[Subject] {
        self.semesters(degree_type_id, degree_id, specialization_id)
            .iter()
            .find(|s| s.id == semester_id)
            .map(|s| s.subjects.as_slice())
            .unwrap_or(&[])
    }

    /// The standard academic tree shipped with the platform.
    pub fn standard() -> Self {
        Self::new(vec![diploma(), bachelors(), masters()])
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

// =============================================================================
// STANDARD TREE DATA
// =============================================================================

fn subj(id: &str, name: &str, description: &str) -> Subject {
    Subject {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
    }
}

fn sem(id: &str, name: &str, description: &str, subjects: Vec<Subject>) -> Semester {
    Semester {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        subjects,
    }
}

fn diploma() -> DegreeType {
    let dca = Degree {
        id: "dca".to_string(),
        name: "DCA".to_string(),
        full_name: "Diploma in Computer Applications".to_string(),
        description: "Computer applications and programming".to_string(),
        duration: "2 years".to_string(),
        semesters: vec![
            sem(
                "sem1",
                "Semester 1",
                "First semester",
                vec![
                    subj("basic_computer", "Basic Computer Skills", "Introduction to computers"),
                    subj("office_apps", "Office Applications", "MS Office suite"),
                    subj("typing", "Typing Skills", "Keyboard proficiency"),
                ],
            ),
            sem(
                "sem2",
                "Semester 2",
                "Second semester",
                vec![
                    subj("programming_basics", "Programming Basics", "Introduction to programming"),
                    subj("web_design", "Web Design", "HTML and CSS"),
                    subj("database_basics", "Database Basics", "Introduction to databases"),
                ],
            ),
            sem(
                "sem3",
                "Semester 3",
                "Third semester",
                vec![
                    subj("advanced_programming", "Advanced Programming", "Advanced programming concepts"),
                    subj("web_development", "Web Development", "JavaScript and PHP"),
                    subj("project_work", "Project Work", "Practical project implementation"),
                ],
            ),
            sem(
                "sem4",
                "Semester 4",
                "Fourth semester",
                vec![
                    subj("internship", "Internship", "Industry training"),
                    subj("final_project", "Final Project", "Capstone project"),
                ],
            ),
        ],
        specializations: vec![],
    };

    let dce = Degree {
        id: "dce".to_string(),
        name: "DCE".to_string(),
        full_name: "Diploma in Civil Engineering".to_string(),
        description: "Civil engineering fundamentals".to_string(),
        duration: "3 years".to_string(),
        semesters: vec![
            sem(
                "sem1",
                "Semester 1",
                "First semester",
                vec![
                    subj("engineering_math", "Engineering Mathematics", "Basic mathematics for engineering"),
                    subj("engineering_physics", "Engineering Physics", "Physics fundamentals"),
                    subj("engineering_chemistry", "Engineering Chemistry", "Chemistry basics"),
                ],
            ),
            sem(
                "sem2",
                "Semester 2",
                "Second semester",
                vec![
                    subj("engineering_drawing", "Engineering Drawing", "Technical drawing skills"),
                    subj("basic_mechanics", "Basic Mechanics", "Mechanics fundamentals"),
                    subj("workshop_practice", "Workshop Practice", "Practical workshop skills"),
                ],
            ),
            sem(
                "sem3",
                "Semester 3",
                "Third semester",
                vec![
                    subj("surveying", "Surveying", "Land surveying techniques"),
                    subj("building_materials", "Building Materials", "Construction materials"),
                    subj("soil_mechanics", "Soil Mechanics", "Soil properties and behavior"),
                ],
            ),
            sem(
                "sem4",
                "Semester 4",
                "Fourth semester",
                vec![
                    subj("structural_analysis", "Structural Analysis", "Analysis of structures"),
                    subj("concrete_technology", "Concrete Technology", "Concrete design and properties"),
                    subj("transportation", "Transportation Engineering", "Road and highway design"),
                ],
            ),
            sem(
                "sem5",
                "Semester 5",
                "Fifth semester",
                vec![
                    subj("hydraulics", "Hydraulics", "Water flow and fluid mechanics"),
                    subj("construction_management", "Construction Management", "Project management"),
                    subj("estimating", "Estimating and Costing", "Cost estimation"),
                ],
            ),
            sem(
                "sem6",
                "Semester 6",
                "Sixth semester",
                vec![
                    subj("internship", "Internship", "Industry training"),
                    subj("final_project", "Final Project", "Capstone project"),
                ],
            ),
        ],
        specializations: vec![],
    };

    DegreeType {
        id: "diploma".to_string(),
        name: "Diploma".to_string(),
        icon: "🎓".to_string(),
        description: "2-3 year programs".to_string(),
        duration: "2-3 years".to_string(),
        degrees: vec![dca, dce],
    }
}

fn bachelors() -> DegreeType {
    let btech_cs = Specialization {
        id: "cs".to_string(),
        name: "Computer Science".to_string(),
        icon: "💻".to_string(),
        description: "Software development and computer systems".to_string(),
        semesters: vec![
            sem(
                "sem1",
                "Semester 1",
                "First semester",
                vec![
                    subj("engineering_mathematics", "Engineering Mathematics", "Calculus and algebra"),
                    subj("engineering_physics", "Engineering Physics", "Physics fundamentals"),
                    subj("engineering_chemistry", "Engineering Chemistry", "Chemistry basics"),
                    subj("basic_electrical", "Basic Electrical Engineering", "Electrical fundamentals"),
                ],
            ),
            sem(
                "sem2",
                "Semester 2",
                "Second semester",
                vec![
                    subj("programming_fundamentals", "Programming Fundamentals", "C programming"),
                    subj("digital_logic", "Digital Logic Design", "Boolean algebra and circuits"),
                    subj("data_structures", "Data Structures", "Arrays, linked lists, trees"),
                    subj("computer_organization", "Computer Organization", "Computer architecture"),
                ],
            ),
            sem(
                "sem3",
                "Semester 3",
                "Third semester",
                vec![
                    subj("object_oriented", "Object Oriented Programming", "Java programming"),
                    subj("database_management", "Database Management Systems", "SQL and database design"),
                    subj("computer_networks", "Computer Networks", "Network protocols and architecture"),
                    subj("operating_systems", "Operating Systems", "OS concepts and design"),
                ],
            ),
            sem(
                "sem4",
                "Semester 4",
                "Fourth semester",
                vec![
                    subj("software_engineering", "Software Engineering", "Software development lifecycle"),
                    subj("web_technologies", "Web Technologies", "HTML, CSS, JavaScript"),
                    subj("algorithm_analysis", "Algorithm Analysis", "Algorithm design and complexity"),
                    subj("microprocessors", "Microprocessors", "Microprocessor architecture"),
                ],
            ),
            sem(
                "sem5",
                "Semester 5",
                "Fifth semester",
                vec![
                    subj("artificial_intelligence", "Artificial Intelligence", "AI and machine learning"),
                    subj("computer_graphics", "Computer Graphics", "Graphics programming"),
                    subj("compiler_design", "Compiler Design", "Compiler construction"),
                    subj("distributed_systems", "Distributed Systems", "Distributed computing"),
                ],
            ),
            sem(
                "sem6",
                "Semester 6",
                "Sixth semester",
                vec![
                    subj("data_mining", "Data Mining", "Data analysis and mining"),
                    subj("cloud_computing", "Cloud Computing", "Cloud platforms and services"),
                    subj("cyber_security", "Cyber Security", "Information security"),
                    subj("mobile_computing", "Mobile Computing", "Mobile app development"),
                ],
            ),
            sem(
                "sem7",
                "Semester 7",
                "Seventh semester",
                vec![
                    subj("internship", "Internship", "Industry training"),
                    subj("project_work", "Project Work", "Major project"),
                ],
            ),
            sem(
                "sem8",
                "Semester 8",
                "Eighth semester",
                vec![
                    subj("final_project", "Final Year Project", "Capstone project"),
                    subj("professional_ethics", "Professional Ethics", "Engineering ethics"),
                ],
            ),
        ],
    };

    let btech_it = Specialization {
        id: "it".to_string(),
        name: "Information Technology".to_string(),
        icon: "🖥️".to_string(),
        description: "Information systems and technology".to_string(),
        semesters: vec![
            sem(
                "sem1",
                "Semester 1",
                "First semester",
                vec![
                    subj("engineering_mathematics", "Engineering Mathematics", "Calculus and algebra"),
                    subj("engineering_physics", "Engineering Physics", "Physics fundamentals"),
                    subj("programming_basics", "Programming Basics", "Introduction to programming"),
                    subj("digital_electronics", "Digital Electronics", "Digital circuits"),
                ],
            ),
            sem(
                "sem2",
                "Semester 2",
                "Second semester",
                vec![
                    subj("data_structures", "Data Structures", "Data organization"),
                    subj("web_design", "Web Design", "HTML, CSS, JavaScript"),
                    subj("database_concepts", "Database Concepts", "Database fundamentals"),
                    subj("computer_networks", "Computer Networks", "Network basics"),
                ],
            ),
        ],
    };

    let btech = Degree {
        id: "btech".to_string(),
        name: "B.Tech".to_string(),
        full_name: "Bachelor of Technology".to_string(),
        description: "Engineering and technology".to_string(),
        duration: "4 years".to_string(),
        semesters: vec![],
        specializations: vec![btech_cs, btech_it],
    };

    let bca = Degree {
        id: "bca".to_string(),
        name: "BCA".to_string(),
        full_name: "Bachelor of Computer Applications".to_string(),
        description: "Computer applications and software development".to_string(),
        duration: "3 years".to_string(),
        semesters: vec![
            sem(
                "sem1",
                "Semester 1",
                "First semester",
                vec![
                    subj("computer_fundamentals", "Computer Fundamentals", "Basic computer concepts"),
                    subj("programming_c", "Programming in C", "C programming language"),
                    subj("mathematics", "Mathematics", "Discrete mathematics"),
                    subj("english", "English Communication", "Communication skills"),
                ],
            ),
            sem(
                "sem2",
                "Semester 2",
                "Second semester",
                vec![
                    subj("data_structures", "Data Structures", "Data organization"),
                    subj("web_design", "Web Design", "HTML and CSS"),
                    subj("database_systems", "Database Systems", "SQL and database design"),
                    subj("business_communication", "Business Communication", "Professional communication"),
                ],
            ),
            sem(
                "sem3",
                "Semester 3",
                "Third semester",
                vec![
                    subj("object_oriented", "Object Oriented Programming", "Java programming"),
                    subj("computer_networks", "Computer Networks", "Network fundamentals"),
                    subj("operating_systems", "Operating Systems", "OS concepts"),
                    subj("software_engineering", "Software Engineering", "Software development"),
                ],
            ),
            sem(
                "sem4",
                "Semester 4",
                "Fourth semester",
                vec![
                    subj("web_development", "Web Development", "PHP and JavaScript"),
                    subj("mobile_apps", "Mobile Application Development", "Android development"),
                    subj("data_mining", "Data Mining", "Data analysis"),
                    subj("cyber_security", "Cyber Security", "Information security"),
                ],
            ),
            sem(
                "sem5",
                "Semester 5",
                "Fifth semester",
                vec![
                    subj("cloud_computing", "Cloud Computing", "Cloud platforms"),
                    subj("machine_learning", "Machine Learning", "ML basics"),
                    subj("project_work", "Project Work", "Major project"),
                ],
            ),
            sem(
                "sem6",
                "Semester 6",
                "Sixth semester",
                vec![
                    subj("internship", "Internship", "Industry training"),
                    subj("final_project", "Final Project", "Capstone project"),
                ],
            ),
        ],
        specializations: vec![],
    };

    DegreeType {
        id: "bachelors".to_string(),
        name: "Bachelor's".to_string(),
        icon: "🎓".to_string(),
        description: "3-4 year programs".to_string(),
        duration: "3-4 years".to_string(),
        degrees: vec![btech, bca],
    }
}

fn masters() -> DegreeType {
    let mtech_cs = Specialization {
        id: "cs".to_string(),
        name: "Computer Science".to_string(),
        icon: "💻".to_string(),
        description: "Advanced computer science".to_string(),
        semesters: vec![
            sem(
                "sem1",
                "Semester 1",
                "First semester",
                vec![
                    subj("advanced_algorithms", "Advanced Algorithms", "Complex algorithm design"),
                    subj("machine_learning", "Machine Learning", "ML algorithms and models"),
                    subj("distributed_systems", "Distributed Systems", "Distributed computing"),
                    subj("research_methodology", "Research Methodology", "Research techniques"),
                ],
            ),
            sem(
                "sem2",
                "Semester 2",
                "Second semester",
                vec![
                    subj("deep_learning", "Deep Learning", "Neural networks and AI"),
                    subj("cloud_computing", "Cloud Computing", "Advanced cloud platforms"),
                    subj("cyber_security", "Advanced Cyber Security", "Security protocols"),
                    subj("big_data", "Big Data Analytics", "Large-scale data processing"),
                ],
            ),
            sem(
                "sem3",
                "Semester 3",
                "Third semester",
                vec![
                    subj("internship", "Internship", "Industry research"),
                    subj("thesis_work", "Thesis Work", "Research project"),
                ],
            ),
            sem(
                "sem4",
                "Semester 4",
                "Fourth semester",
                vec![
                    subj("final_thesis", "Final Thesis", "Research completion"),
                    subj("defense", "Thesis Defense", "Research presentation"),
                ],
            ),
        ],
    };

    let mtech = Degree {
        id: "mtech".to_string(),
        name: "M.Tech".to_string(),
        full_name: "Master of Technology".to_string(),
        description: "Advanced engineering and technology".to_string(),
        duration: "2 years".to_string(),
        semesters: vec![],
        specializations: vec![mtech_cs],
    };

    DegreeType {
        id: "masters".to_string(),
        name: "Master's".to_string(),
        icon: "🎓".to_string(),
        description: "1-2 year programs".to_string(),
        duration: "1-2 years".to_string(),
        degrees: vec![mtech],
    }
}
