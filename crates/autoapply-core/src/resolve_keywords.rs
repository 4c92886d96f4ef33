//! Built-in keyword table.
//!
//! Order matters only among identical phrases: a later entry replaces an
//! earlier one and the earlier one is reported as shadowed. Phrases holding
//! characters that normalization strips can never match and are reported as
//! unreachable.

pub(crate) const BUILTIN_KEYWORDS: &[(&str, &str)] = &[
    // Personal identity
    ("pronoun", "personalInfo.pronouns"),
    ("country of residence", "personalInfo.countryOfResidence"),
    ("full name", "personalInfo.fullName"),
    ("email", "personalInfo.email"),
    ("phone", "personalInfo.phone"),
    ("location", "personalInfo.location"),
    // Legal and work authorization
    ("authorized to work", "legalAndWorkAuth.authorizedToWorkIn"),
    ("visa", "legalAndWorkAuth.visaType"),
    ("sponsorship", "legalAndWorkAuth.needSponsorship"),
    // Education
    ("gpa", "education.0.gpa"),
    ("graduation date", "education.0.graduationDate"),
    ("student", "education.0.currentlyEnrolled"),
    ("internship", "extraAndOptional.lookingForInternship"),
    ("bachelor", "@bachelors-degree"),
    ("degree", "@bachelors-degree"),
    ("bachelors degree", "@bachelors-degree"),
    ("bachelor's degree", "@bachelors-degree"),
    // Compensation
    ("salary", "jobPreferences.expectedCTC"),
    ("expected ctc", "jobPreferences.expectedCTC"),
    ("ectc", "jobPreferences.salaryExpectation"),
    ("expected ctc", "jobPreferences.expectedCTC"),
    ("expected compensation", "jobPreferences.expectedCTC"),
    ("expected salary", "jobPreferences.expectedCTC"),
    ("expected annual compensation", "jobPreferences.expectedCTC"),
    ("expected ctc in inr", "jobPreferences.expectedCTC"),
    ("expected annual compensation in inr", "jobPreferences.expectedCTC"),
    ("current salary", "jobPreferences.currentSalary"),
    ("current ctc", "jobPreferences.currentSalary"),
    ("current annual compensation", "jobPreferences.currentSalary"),
    ("current ctc in inr", "jobPreferences.currentSalary"),
    ("current annual compensation in inr", "jobPreferences.currentSalary"),
    ("current ctc", "jobPreferences.currentSalary"),
    // Experience
    ("total years of professional experience", "jobPreferences.totalITExperience"),
    ("total additional months of experience", "jobPreferences.totalMonthsExperience"),
    ("experience", "@experience"),
    ("exp", "@experience"),
    ("rate your", "@skill-rating"),
    ("scale of 1 to 10", "@skill-rating"),
    // Documents and links
    ("resume", "documentsAndLinks.resumeURL"),
    ("cover letter", "documentsAndLinks.coverLetter"),
    ("portfolio", "documentsAndLinks.portfolioURL"),
    ("website", "documentsAndLinks.personalWebsite"),
    ("github", "documentsAndLinks.githubURL"),
    ("leetcode", "documentsAndLinks.leetcodeURL"),
    // Behavioral
    ("strength", "behavioralAndMotivation.strengths"),
    ("weakness", "behavioralAndMotivation.weaknesses"),
    // Availability and notice
    ("start date", "availability.startDate"),
    ("start immediately", "availability.startDate"),
    ("notice period", "jobPreferences.servingNoticePeriod"),
    ("serving notice period", "jobPreferences.servingNoticePeriod"),
    ("are you serving a notice period", "jobPreferences.servingNoticePeriod"),
    ("are you currently serving a notice period", "jobPreferences.servingNoticePeriod"),
    ("already working", "jobPreferences.currentlyWorking"),
    ("currently working", "jobPreferences.currentlyWorking"),
    ("are you currently working", "jobPreferences.currentlyWorking"),
    ("immediate joiner", "jobPreferences.immediateJoiner"),
    ("immediate to 1 week joiner", "jobPreferences.immediateJoiner"),
    ("1 week joiner", "jobPreferences.immediateJoiner"),
    ("start within 5 days", "jobPreferences.immediateJoiner"),
    ("join in 7 days", "jobPreferences.immediateJoiner"),
    ("start this job immediately", "jobPreferences.immediateJoiner"),
    ("start job immediately", "jobPreferences.immediateJoiner"),
    ("start immediately", "jobPreferences.immediateJoiner"),
    ("start within 2 weeks", "jobPreferences.immediateJoiner"),
    ("within 2 weeks", "jobPreferences.immediateJoiner"),
    ("how soon", "@availability"),
    ("how soon can you join", "@availability"),
    ("resigned", "jobPreferences.resigned"),
    ("last working date", "jobPreferences.lastWorkingDateConfirmed"),
    // Work arrangement
    ("remote", "extraAndOptional.openToRemoteWork"),
    ("hybrid", "jobPreferences.hybridWork"),
    ("hybrid setting", "jobPreferences.hybridWork"),
    ("hybrid work", "jobPreferences.hybridWork"),
    ("working in a hybrid", "jobPreferences.hybridWork"),
    ("comfortable working in hybrid", "jobPreferences.hybridWork"),
    ("commuting", "jobPreferences.commuteToLocation"),
    ("commute to location", "jobPreferences.commuteToLocation"),
    ("comfortable commuting", "jobPreferences.commuteToLocation"),
    ("commuting to this job's location", "jobPreferences.commuteToLocation"),
    ("relocate", "@relocation"),
    ("travel", "extraAndOptional.willingToTravel"),
    // Technologies
    ("c#", "jobPreferences.skillRatings.C#"),
    ("next.js", "jobPreferences.skillRatings.Next.js"),
    ("docker", "jobPreferences.technologies.docker"),
    ("container", "jobPreferences.technologies.docker"),
    ("containerization", "jobPreferences.technologies.docker"),
    ("kubernetes", "jobPreferences.technologies.kubernetes"),
    ("orchestration", "jobPreferences.technologies.kubernetes"),
    ("aws", "jobPreferences.technologies.aws"),
    ("cloud", "jobPreferences.technologies.aws"),
    ("frontend", "jobPreferences.technologies.react"),
    ("react", "jobPreferences.technologies.react"),
    ("redux", "jobPreferences.technologies.redux"),
    ("tailwind", "jobPreferences.technologies.tailwind"),
    ("figma", "jobPreferences.technologies.figma"),
    ("postgresql", "jobPreferences.technologies.postgresql"),
    ("redis", "jobPreferences.technologies.redis"),
    ("git", "jobPreferences.technologies.git"),
    ("cicd", "jobPreferences.technologies.cicd"),
    ("node", "jobPreferences.technologies.node"),
    ("python", "jobPreferences.technologies.python"),
    ("java", "jobPreferences.technologies.java"),
    // Extras
    ("license", "extraAndOptional.driversLicense"),
    ("passport", "extraAndOptional.passportAvailability"),
    ("accommodation", "extraAndOptional.requireAccommodations"),
    ("contract", "extraAndOptional.openToContract"),
    ("mentoring", "extraAndOptional.wantsMentoring"),
    ("unpaid internship", "extraAndOptional.unpaidInternshipComfort"),
    ("comfortable with unpaid", "extraAndOptional.unpaidInternshipComfort"),
    ("comfortable with an unpaid", "extraAndOptional.unpaidInternshipComfort"),
    ("6-month internship", "extraAndOptional.unpaidInternshipComfort"),
];
